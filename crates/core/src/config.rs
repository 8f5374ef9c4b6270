use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::rules::DEFAULT_PER_USER_MINIMUM_MBPS;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub rules: RulesConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct RulesConfig {
    pub per_user_minimum_mbps: f64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub remote_endpoint: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig { enabled: false, endpoint: None, timeout_secs: 30 },
            rules: RulesConfig { per_user_minimum_mbps: DEFAULT_PER_USER_MINIMUM_MBPS },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("plansim.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(remote) = patch.remote {
            if let Some(enabled) = remote.enabled {
                self.remote.enabled = enabled;
            }
            if let Some(endpoint) = remote.endpoint {
                self.remote.endpoint = Some(endpoint);
            }
            if let Some(timeout_secs) = remote.timeout_secs {
                self.remote.timeout_secs = timeout_secs;
            }
        }

        if let Some(rules) = patch.rules {
            if let Some(per_user_minimum_mbps) = rules.per_user_minimum_mbps {
                self.rules.per_user_minimum_mbps = per_user_minimum_mbps;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("PLANSIM_REMOTE_ENABLED") {
            self.remote.enabled = parse_bool("PLANSIM_REMOTE_ENABLED", &value)?;
        }
        if let Some(value) = read_env("PLANSIM_REMOTE_ENDPOINT") {
            self.remote.endpoint = Some(value);
        }
        if let Some(value) = read_env("PLANSIM_REMOTE_TIMEOUT_SECS") {
            self.remote.timeout_secs = parse_u64("PLANSIM_REMOTE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("PLANSIM_RULES_PER_USER_MINIMUM_MBPS") {
            self.rules.per_user_minimum_mbps =
                parse_f64("PLANSIM_RULES_PER_USER_MINIMUM_MBPS", &value)?;
        }
        if let Some(value) = read_env("PLANSIM_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("PLANSIM_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(remote_endpoint) = overrides.remote_endpoint {
            self.remote.enabled = true;
            self.remote.endpoint = Some(remote_endpoint);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.enabled {
            let endpoint = self.remote.endpoint.as_deref().unwrap_or("").trim().to_string();
            if endpoint.is_empty() {
                return Err(ConfigError::Validation(
                    "remote.enabled is true but remote.endpoint is not set".to_string(),
                ));
            }
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::Validation(
                    "remote.endpoint must start with http:// or https://".to_string(),
                ));
            }
        }

        if self.remote.timeout_secs == 0 || self.remote.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "remote.timeout_secs must be in range 1..=300".to_string(),
            ));
        }

        if self.rules.per_user_minimum_mbps <= 0.0 {
            return Err(ConfigError::Validation(
                "rules.per_user_minimum_mbps must be greater than zero".to_string(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Validation(
                "logging.level must be one of trace|debug|info|warn|error".to_string(),
            )),
        }
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("plansim.toml"), PathBuf::from("config/plansim.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    remote: Option<RemotePatch>,
    rules: Option<RulesPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RemotePatch {
    enabled: Option<bool>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RulesPatch {
    per_user_minimum_mbps: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_validate_without_any_file() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(&[
            "PLANSIM_REMOTE_ENABLED",
            "PLANSIM_REMOTE_ENDPOINT",
            "PLANSIM_LOG_LEVEL",
            "PLANSIM_LOG_FORMAT",
        ]);

        let config = AppConfig::load(LoadOptions::default()).expect("load defaults");
        assert!(!config.remote.enabled);
        assert_eq!(config.rules.per_user_minimum_mbps, 25.0);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_then_env_then_overrides_precedence() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("PLANSIM_LOG_LEVEL", "warn");

        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("plansim.toml");
        fs::write(
            &path,
            r#"
[remote]
enabled = true
endpoint = "https://validator.example.net/v1/validate"

[logging]
level = "debug"
"#,
        )
        .expect("write config file");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(path),
            overrides: ConfigOverrides {
                remote_endpoint: Some("https://override.example.net".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("load config");

        clear_vars(&["PLANSIM_LOG_LEVEL"]);

        assert_eq!(config.remote.endpoint.as_deref(), Some("https://override.example.net"));
        assert_eq!(config.logging.level, "warn", "env wins over file");
    }

    #[test]
    fn remote_enabled_without_endpoint_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        env::set_var("PLANSIM_REMOTE_ENABLED", "true");

        let result = AppConfig::load(LoadOptions::default());
        clear_vars(&["PLANSIM_REMOTE_ENABLED"]);

        let error = result.expect_err("must fail validation");
        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("remote.endpoint")
        ));
    }

    #[test]
    fn unparseable_env_override_is_rejected_with_key_and_value() {
        let _guard = env_lock().lock().expect("env lock");
        env::set_var("PLANSIM_REMOTE_TIMEOUT_SECS", "soon");

        let result = AppConfig::load(LoadOptions::default());
        clear_vars(&["PLANSIM_REMOTE_TIMEOUT_SECS"]);

        assert!(matches!(
            result.expect_err("must fail"),
            ConfigError::InvalidEnvOverride { ref key, ref value }
                if key == "PLANSIM_REMOTE_TIMEOUT_SECS" && value == "soon"
        ));
    }
}

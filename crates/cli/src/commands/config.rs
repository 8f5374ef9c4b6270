use serde_json::json;

use plansim_core::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let payload = json!({
        "remote": {
            "enabled": config.remote.enabled,
            "endpoint": config.remote.endpoint,
            "timeout_secs": config.remote.timeout_secs,
        },
        "rules": {
            "per_user_minimum_mbps": config.rules.per_user_minimum_mbps,
        },
        "logging": {
            "level": config.logging.level,
            "format": config.logging.format,
        },
    });

    CommandResult::success_with_report("config", "effective configuration", payload)
}

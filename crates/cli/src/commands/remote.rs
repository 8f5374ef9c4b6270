use std::path::Path;
use std::time::Duration;

use plansim_client::{
    HttpRemoteValidator, RemoteValidationRequest, RemoteValidationSession,
};
use plansim_core::{AppConfig, ConfigOverrides, LoadOptions};

use crate::commands::{build_scenario, CommandResult};

pub fn run(
    scenario_path: Option<&Path>,
    preset: Option<&str>,
    duration_hours: f64,
    endpoint: Option<String>,
) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides { remote_endpoint: endpoint, ..ConfigOverrides::default() },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "remote",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    if !config.remote.enabled {
        return CommandResult::failure(
            "remote",
            "config_validation",
            "remote validation is disabled; enable [remote] in plansim.toml or pass --endpoint",
            2,
        );
    }
    let Some(endpoint) = config.remote.endpoint else {
        return CommandResult::failure(
            "remote",
            "config_validation",
            "remote validation is enabled but no endpoint is configured",
            2,
        );
    };

    let scenario = match build_scenario(scenario_path, preset, duration_hours) {
        Ok(scenario) => scenario,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("remote", error_class, message, exit_code);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "remote",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let validator =
        match HttpRemoteValidator::new(&endpoint, Duration::from_secs(config.remote.timeout_secs)) {
            Ok(validator) => validator,
            Err(error) => {
                return CommandResult::failure("remote", "remote_validation", error.to_string(), 5);
            }
        };

    let session = RemoteValidationSession::new(validator);
    let request = RemoteValidationRequest::from_scenario(&scenario);

    let report = match runtime.block_on(session.submit(&request)) {
        Ok(report) => report,
        Err(error) => {
            return CommandResult::failure("remote", "remote_validation", error.to_string(), 5);
        }
    };

    let message = format!(
        "remote validation {} ({} checks) via {endpoint}",
        report.overall_status.as_str(),
        report.total_checks
    );
    match serde_json::to_value(&report) {
        Ok(payload) => CommandResult::success_with_report("remote", message, payload),
        Err(error) => CommandResult::failure(
            "remote",
            "serialization",
            format!("could not serialize report: {error}"),
            5,
        ),
    }
}

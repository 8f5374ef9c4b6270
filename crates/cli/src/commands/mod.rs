pub mod config;
pub mod presets;
pub mod remote;
pub mod validate;

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use plansim_core::{scenario_from_preset, PlanConfig, PresetKind, UsageScenario};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, serde::Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            report: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_report(
        command: &str,
        message: impl Into<String>,
        report: Value,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            report: Some(report),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn rendered(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            report: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) type InputFailure = (&'static str, String, u8);

/// Scenario input file shape; the label is derived, never user-supplied.
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    download_gb: f64,
    upload_gb: f64,
    duration_hours: f64,
    concurrent_users: u32,
}

pub(crate) fn load_plan(path: &Path) -> Result<PlanConfig, InputFailure> {
    let raw = fs::read_to_string(path).map_err(|error| {
        ("plan_input", format!("could not read plan file `{}`: {error}", path.display()), 2u8)
    })?;

    toml::from_str::<PlanConfig>(&raw).map_err(|error| {
        ("plan_input", format!("could not parse plan file `{}`: {error}", path.display()), 2u8)
    })
}

pub(crate) fn build_scenario(
    scenario_path: Option<&Path>,
    preset: Option<&str>,
    duration_hours: f64,
) -> Result<UsageScenario, InputFailure> {
    if let Some(path) = scenario_path {
        let raw = fs::read_to_string(path).map_err(|error| {
            (
                "scenario_input",
                format!("could not read scenario file `{}`: {error}", path.display()),
                2u8,
            )
        })?;
        let file = toml::from_str::<ScenarioFile>(&raw).map_err(|error| {
            (
                "scenario_input",
                format!("could not parse scenario file `{}`: {error}", path.display()),
                2u8,
            )
        })?;
        return UsageScenario::new(
            file.download_gb,
            file.upload_gb,
            file.duration_hours,
            file.concurrent_users,
        )
        .map_err(|error| ("scenario_input", error.to_string(), 2u8));
    }

    let kind = match preset {
        Some(name) => PresetKind::parse(name)
            .map_err(|error| ("scenario_input", error.to_string(), 2u8))?,
        None => PresetKind::Moderate,
    };
    scenario_from_preset(kind, duration_hours)
        .map_err(|error| ("scenario_input", error.to_string(), 2u8))
}

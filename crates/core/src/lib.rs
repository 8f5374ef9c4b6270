//! Deterministic validation and usage simulation for internet service plans.
//!
//! The crate is split into a pure domain model (`domain`), the simulation
//! and rule engines (`engine`), and application configuration (`config`).
//! All engines are free of I/O; identical inputs always produce identical
//! analyses.

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::plan::{PlanConfig, PlanId, ThrottlePolicy};
pub use domain::report::{
    CheckKind, ReportStatus, Severity, ValidationCheck, ValidationReport,
};
pub use domain::scenario::UsageScenario;
pub use engine::cap::{CapAnalysis, CapEngine, DeterministicCapEngine};
pub use engine::fup::{DeterministicFupEngine, FupAnalysis, FupEngine};
pub use engine::presets::{catalog, preset, scenario_from_preset, PresetKind, ScenarioPreset};
pub use engine::rules::{DeterministicRuleEngine, RuleEngine, RulePolicy};
pub use engine::window::{TimeOfDay, WindowEvaluation};
pub use engine::{
    DeterministicValidationRuntime, EvaluationInput, PlanEvaluation, ValidationRuntime,
};
pub use errors::DomainError;

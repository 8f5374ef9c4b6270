use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Fixed, named battery of plan checks. Iteration order is fixed for
/// reproducible report output; aggregation itself is order-independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    SpeedValidation,
    DataCapValidation,
    PricingValidation,
    TimeRestrictionValidation,
    QosValidation,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpeedValidation => "speed_validation",
            Self::DataCapValidation => "data_cap_validation",
            Self::PricingValidation => "pricing_validation",
            Self::TimeRestrictionValidation => "time_restriction_validation",
            Self::QosValidation => "qos_validation",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCheck {
    pub name: CheckKind,
    pub passed: bool,
    pub severity: Severity,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl ValidationCheck {
    pub fn pass(name: CheckKind, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            severity: Severity::Info,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn warning(name: CheckKind, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            severity: Severity::Warning,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn failure(name: CheckKind, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            severity: Severity::Error,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Warning,
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Failed => "failed",
        }
    }
}

/// Cost and speed figures carried into the report alongside the check list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportFigures {
    pub estimated_monthly_cost: Decimal,
    pub estimated_overage_cost: Decimal,
    pub peak_download_speed_mbps: f64,
    pub average_download_speed_mbps: f64,
    pub peak_upload_speed_mbps: f64,
    pub average_upload_speed_mbps: f64,
    pub data_cap_exceeded: bool,
    pub throttling_triggered: bool,
}

/// Immutable outcome of one explicit validation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
    pub passed_checks: usize,
    pub failed_checks: usize,
    pub warning_checks: usize,
    pub total_checks: usize,
    pub overall_status: ReportStatus,
    pub estimated_monthly_cost: Decimal,
    pub estimated_overage_cost: Decimal,
    pub peak_download_speed_mbps: f64,
    pub average_download_speed_mbps: f64,
    pub peak_upload_speed_mbps: f64,
    pub average_upload_speed_mbps: f64,
    pub data_cap_exceeded: bool,
    pub throttling_triggered: bool,
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn from_parts(
        checks: Vec<ValidationCheck>,
        figures: ReportFigures,
        validated_at: DateTime<Utc>,
    ) -> Self {
        let passed_checks = checks.iter().filter(|check| check.passed).count();
        let failed_checks = checks
            .iter()
            .filter(|check| check.severity == Severity::Error && !check.passed)
            .count();
        let warning_checks =
            checks.iter().filter(|check| check.severity == Severity::Warning).count();
        let total_checks = checks.len();
        let overall_status = overall_status(&checks);

        Self {
            checks,
            passed_checks,
            failed_checks,
            warning_checks,
            total_checks,
            overall_status,
            estimated_monthly_cost: figures.estimated_monthly_cost,
            estimated_overage_cost: figures.estimated_overage_cost,
            peak_download_speed_mbps: figures.peak_download_speed_mbps,
            average_download_speed_mbps: figures.average_download_speed_mbps,
            peak_upload_speed_mbps: figures.peak_upload_speed_mbps,
            average_upload_speed_mbps: figures.average_upload_speed_mbps,
            data_cap_exceeded: figures.data_cap_exceeded,
            throttling_triggered: figures.throttling_triggered,
            validated_at,
        }
    }

    pub fn total_estimated_cost(&self) -> Decimal {
        self.estimated_monthly_cost + self.estimated_overage_cost
    }
}

/// Any error-severity failure forces `Failed`, regardless of how many checks
/// passed; otherwise any warning demotes `Passed` to `Warning`.
fn overall_status(checks: &[ValidationCheck]) -> ReportStatus {
    let any_failure =
        checks.iter().any(|check| check.severity == Severity::Error && !check.passed);
    if any_failure {
        return ReportStatus::Failed;
    }

    let any_warning = checks.iter().any(|check| check.severity == Severity::Warning);
    if any_warning {
        return ReportStatus::Warning;
    }

    ReportStatus::Passed
}

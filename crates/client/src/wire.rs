//! Wire DTOs exchanged with an external plan-validation service.
//!
//! The request carries the usage scenario plus per-category toggles; the
//! response mirrors a local [`ValidationReport`] so callers can treat local
//! and remote runs uniformly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use plansim_core::domain::report::{ReportFigures, ValidationCheck, ValidationReport};
use plansim_core::domain::scenario::UsageScenario;

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteValidationRequest {
    pub test_download_usage_gb: f64,
    pub test_upload_usage_gb: f64,
    pub test_duration_hours: f64,
    pub test_concurrent_users: u32,
    #[serde(default = "default_true")]
    pub validate_speeds: bool,
    #[serde(default = "default_true")]
    pub validate_data_caps: bool,
    #[serde(default = "default_true")]
    pub validate_pricing: bool,
    #[serde(default = "default_true")]
    pub validate_time_restrictions: bool,
    #[serde(default = "default_true")]
    pub validate_qos: bool,
}

impl RemoteValidationRequest {
    /// All validation categories enabled.
    pub fn from_scenario(scenario: &UsageScenario) -> Self {
        Self {
            test_download_usage_gb: scenario.download_gb(),
            test_upload_usage_gb: scenario.upload_gb(),
            test_duration_hours: scenario.duration_hours(),
            test_concurrent_users: scenario.concurrent_users(),
            validate_speeds: true,
            validate_data_caps: true,
            validate_pricing: true,
            validate_time_restrictions: true,
            validate_qos: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteValidationResponse {
    pub results: Vec<ValidationCheck>,
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

impl RemoteValidationResponse {
    /// Re-aggregates counts and overall status locally rather than trusting
    /// any summary the remote side might send alongside the check list.
    pub fn into_report(self) -> ValidationReport {
        ValidationReport::from_parts(
            self.results,
            ReportFigures {
                estimated_monthly_cost: self.estimated_monthly_cost,
                estimated_overage_cost: self.estimated_overage_cost,
                peak_download_speed_mbps: self.peak_download_speed_mbps,
                average_download_speed_mbps: self.average_download_speed_mbps,
                peak_upload_speed_mbps: self.peak_upload_speed_mbps,
                average_upload_speed_mbps: self.average_upload_speed_mbps,
                data_cap_exceeded: self.data_cap_exceeded,
                throttling_triggered: self.throttling_triggered,
            },
            self.validated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use plansim_core::domain::report::{CheckKind, ReportStatus, ValidationCheck};
    use plansim_core::domain::scenario::UsageScenario;

    use super::{RemoteValidationRequest, RemoteValidationResponse};

    #[test]
    fn request_defaults_all_validation_toggles_to_true() {
        let raw = r#"{
            "test_download_usage_gb": 300.0,
            "test_upload_usage_gb": 50.0,
            "test_duration_hours": 720.0,
            "test_concurrent_users": 3
        }"#;

        let request: RemoteValidationRequest = serde_json::from_str(raw).expect("decode request");
        assert!(request.validate_speeds);
        assert!(request.validate_data_caps);
        assert!(request.validate_pricing);
        assert!(request.validate_time_restrictions);
        assert!(request.validate_qos);
    }

    #[test]
    fn request_carries_scenario_fields_verbatim() {
        let scenario = UsageScenario::new(800.0, 150.0, 720.0, 5).expect("scenario");
        let request = RemoteValidationRequest::from_scenario(&scenario);

        assert_eq!(request.test_download_usage_gb, 800.0);
        assert_eq!(request.test_upload_usage_gb, 150.0);
        assert_eq!(request.test_duration_hours, 720.0);
        assert_eq!(request.test_concurrent_users, 5);
    }

    #[test]
    fn response_aggregation_is_recomputed_from_the_check_list() {
        let raw = r#"{
            "results": [
                {
                    "name": "speed_validation",
                    "passed": true,
                    "severity": "info",
                    "message": "ok",
                    "details": {}
                },
                {
                    "name": "data_cap_validation",
                    "passed": false,
                    "severity": "error",
                    "message": "cap amount must be positive",
                    "details": {}
                }
            ],
            "estimated_monthly_cost": "49.99",
            "estimated_overage_cost": "0",
            "peak_download_speed_mbps": 500.0,
            "average_download_speed_mbps": 500.0,
            "peak_upload_speed_mbps": 100.0,
            "average_upload_speed_mbps": 100.0,
            "data_cap_exceeded": false,
            "throttling_triggered": false,
            "validated_at": "2026-08-01T12:00:00Z"
        }"#;

        let response: RemoteValidationResponse =
            serde_json::from_str(raw).expect("decode response");
        let report = response.into_report();

        assert_eq!(report.overall_status, ReportStatus::Failed);
        assert_eq!(report.total_checks, 2);
        assert_eq!(report.failed_checks, 1);
        assert_eq!(report.checks[1].name, CheckKind::DataCapValidation);
    }

    #[test]
    fn check_list_round_trips_through_the_wire_shape() {
        let check = ValidationCheck::warning(CheckKind::QosValidation, "plan is oversubscribed")
            .with_detail("required_mbps", "125");
        let encoded = serde_json::to_string(&check).expect("encode");
        let decoded: ValidationCheck = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, check);
    }
}

pub mod cap;
pub mod cost;
pub mod fup;
pub mod presets;
pub mod rules;
pub mod units;
pub mod window;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanConfig;
use crate::domain::report::{ReportFigures, ValidationReport};
use crate::domain::scenario::UsageScenario;
use crate::errors::DomainError;

use self::cap::{CapAnalysis, CapEngine, CapInput, DeterministicCapEngine};
use self::cost::{summarize_costs, CostInput, CostSummary};
use self::fup::{DeterministicFupEngine, FupAnalysis, FupEngine, FupInput};
use self::rules::{DeterministicRuleEngine, RuleContext, RuleEngine, RulePolicy};
use self::units::NormalizedPlan;
use self::window::{evaluate_window, TimeOfDay, WindowEvaluation, WindowInput};

#[derive(Clone, Copy, Debug)]
pub struct EvaluationInput<'a> {
    pub plan: &'a PlanConfig,
    pub scenario: &'a UsageScenario,
}

/// All analyses of one run, rebuilt wholesale on every invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanEvaluation {
    pub fup: Option<FupAnalysis>,
    pub cap: Option<CapAnalysis>,
    pub window: Option<WindowEvaluation>,
    pub costs: CostSummary,
    pub report: ValidationReport,
}

pub trait ValidationRuntime: Send + Sync {
    fn evaluate(&self, input: EvaluationInput<'_>) -> Result<PlanEvaluation, DomainError>;
}

pub struct DeterministicValidationRuntime<F, C, R> {
    fup_engine: F,
    cap_engine: C,
    rule_engine: R,
    policy: RulePolicy,
}

impl<F, C, R> DeterministicValidationRuntime<F, C, R> {
    pub fn new(fup_engine: F, cap_engine: C, rule_engine: R) -> Self {
        Self { fup_engine, cap_engine, rule_engine, policy: RulePolicy::default() }
    }

    pub fn with_policy(fup_engine: F, cap_engine: C, rule_engine: R, policy: RulePolicy) -> Self {
        Self { fup_engine, cap_engine, rule_engine, policy }
    }
}

impl Default
    for DeterministicValidationRuntime<
        DeterministicFupEngine,
        DeterministicCapEngine,
        DeterministicRuleEngine,
    >
{
    fn default() -> Self {
        Self::new(DeterministicFupEngine, DeterministicCapEngine, DeterministicRuleEngine)
    }
}

impl<F, C, R> ValidationRuntime for DeterministicValidationRuntime<F, C, R>
where
    F: FupEngine,
    C: CapEngine,
    R: RuleEngine,
{
    fn evaluate(&self, input: EvaluationInput<'_>) -> Result<PlanEvaluation, DomainError> {
        input.scenario.validate()?;
        let normalized = NormalizedPlan::from_plan(input.plan)?;
        let total_usage_gb = input.scenario.total_usage_gb();

        let fup = input.plan.has_fup.then(|| {
            self.fup_engine.simulate(&FupInput {
                total_usage_gb,
                fup_threshold_gb: normalized.fup_threshold_gb,
                duration_hours: input.scenario.duration_hours(),
                normal_speed_mbps: normalized.download_speed_mbps,
                throttled_speed_mbps: normalized.fup_throttle_speed_mbps,
            })
        });

        let cap = input.plan.has_data_cap.then(|| {
            self.cap_engine.analyze(&CapInput {
                total_usage_gb,
                data_cap_gb: normalized.data_cap_gb,
                overage_price_per_gb: input.plan.overage_price_per_gb,
            })
        });

        // Window evaluation only applies when both boundaries parse; an
        // unparseable boundary is reported by the rule battery instead.
        let window = if input.plan.has_time_restrictions {
            let boundaries = (
                TimeOfDay::parse(&input.plan.unrestricted_window_start),
                TimeOfDay::parse(&input.plan.unrestricted_window_end),
            );
            match boundaries {
                (Ok(window_start), Ok(window_end)) => Some(evaluate_window(&WindowInput {
                    window_start,
                    window_end,
                    unlimited: input.plan.unrestricted_data_unlimited,
                    speed_multiplier: input.plan.unrestricted_speed_multiplier,
                    base_speed_mbps: normalized.download_speed_mbps,
                })),
                _ => None,
            }
        } else {
            None
        };

        let checks = self.rule_engine.run(&RuleContext {
            plan: input.plan,
            normalized: &normalized,
            scenario: input.scenario,
            policy: &self.policy,
            fup: fup.as_ref(),
            cap: cap.as_ref(),
        });

        let costs = summarize_costs(&CostInput {
            monthly_price: input.plan.monthly_price,
            download_speed_mbps: normalized.download_speed_mbps,
            upload_speed_mbps: normalized.upload_speed_mbps,
            fup: fup.as_ref(),
            cap: cap.as_ref(),
        });

        let report = ValidationReport::from_parts(
            checks,
            ReportFigures {
                estimated_monthly_cost: costs.estimated_monthly_cost,
                estimated_overage_cost: costs.estimated_overage_cost,
                peak_download_speed_mbps: costs.peak_download_speed_mbps,
                average_download_speed_mbps: costs.average_download_speed_mbps,
                peak_upload_speed_mbps: costs.peak_upload_speed_mbps,
                average_upload_speed_mbps: costs.average_upload_speed_mbps,
                data_cap_exceeded: cap.map(|analysis| analysis.will_exceed).unwrap_or(false),
                throttling_triggered: fup.map(|analysis| analysis.will_trigger).unwrap_or(false),
            },
            Utc::now(),
        );

        Ok(PlanEvaluation { fup, cap, window, costs, report })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::plan::{PlanConfig, PlanId, ThrottlePolicy};
    use crate::domain::report::ReportStatus;
    use crate::domain::scenario::UsageScenario;
    use crate::errors::DomainError;

    use super::{DeterministicValidationRuntime, EvaluationInput, ValidationRuntime};

    fn plan_fixture() -> PlanConfig {
        PlanConfig {
            id: PlanId("fiber-500".to_string()),
            download_speed: 500.0,
            upload_speed: 100.0,
            speed_unit: "Mbps".to_string(),
            has_fup: true,
            fup_threshold: 500.0,
            fup_threshold_unit: "GB".to_string(),
            fup_throttle_speed: 10.0,
            has_data_cap: true,
            data_cap_amount: 1000.0,
            data_cap_unit: "GB".to_string(),
            overage_price_per_gb: Some(Decimal::new(2, 0)),
            throttle_policy: ThrottlePolicy::BillOverage,
            has_time_restrictions: true,
            unrestricted_window_start: "01:00".to_string(),
            unrestricted_window_end: "07:00".to_string(),
            unrestricted_data_unlimited: true,
            unrestricted_speed_multiplier: Some(2.0),
            monthly_price: Decimal::new(4999, 2),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn full_evaluation_combines_all_analyses() {
        let runtime = DeterministicValidationRuntime::default();
        let plan = plan_fixture();
        let scenario = UsageScenario::new(1100.0, 100.0, 720.0, 3).expect("scenario");

        let evaluation =
            runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }).expect("evaluate");

        let fup = evaluation.fup.expect("fup analysis");
        assert!(fup.will_trigger, "1200 GB exceeds the 500 GB threshold");

        let cap = evaluation.cap.expect("cap analysis");
        assert_eq!(cap.overage_gb, 200.0);
        assert_eq!(cap.overage_cost, Decimal::new(400, 0));

        let window = evaluation.window.expect("window evaluation");
        assert_eq!(window.effective_speed_mbps, 1000.0);
        assert!(window.cap_bypassed_during_window);

        assert_eq!(evaluation.report.total_checks, 5);
        assert_eq!(evaluation.report.overall_status, ReportStatus::Passed);
        assert!(evaluation.report.data_cap_exceeded);
        assert!(evaluation.report.throttling_triggered);
        assert_eq!(evaluation.report.estimated_overage_cost, Decimal::new(400, 0));
        assert_eq!(
            evaluation.report.total_estimated_cost(),
            Decimal::new(4999, 2) + Decimal::new(400, 0)
        );
    }

    #[test]
    fn zero_cap_forces_overall_failure_regardless_of_other_checks() {
        let runtime = DeterministicValidationRuntime::default();
        let mut plan = plan_fixture();
        plan.data_cap_amount = 0.0;
        let scenario = UsageScenario::new(300.0, 50.0, 720.0, 3).expect("scenario");

        let evaluation =
            runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }).expect("evaluate");

        assert_eq!(evaluation.report.overall_status, ReportStatus::Failed);
        assert_eq!(evaluation.report.failed_checks, 1);
        assert!(evaluation.report.passed_checks >= 3);
    }

    #[test]
    fn boundary_usage_equal_to_threshold_does_not_throttle() {
        let runtime = DeterministicValidationRuntime::default();
        let plan = plan_fixture();
        let scenario = UsageScenario::new(400.0, 100.0, 720.0, 3).expect("scenario");

        let evaluation =
            runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }).expect("evaluate");

        let fup = evaluation.fup.expect("fup analysis");
        assert!(!fup.will_trigger, "500 GB usage equals the threshold exactly");
        assert!(!evaluation.report.throttling_triggered);
        assert_eq!(evaluation.costs.average_download_speed_mbps, 500.0);
    }

    #[test]
    fn invalid_unit_fails_fast_before_any_analysis() {
        let runtime = DeterministicValidationRuntime::default();
        let mut plan = plan_fixture();
        plan.fup_threshold_unit = "PB".to_string();
        let scenario = UsageScenario::new(300.0, 50.0, 720.0, 3).expect("scenario");

        let error = runtime
            .evaluate(EvaluationInput { plan: &plan, scenario: &scenario })
            .expect_err("must reject");
        assert_eq!(error, DomainError::InvalidUnit("PB".to_string()));
    }

    #[test]
    fn identical_inputs_produce_identical_analyses() {
        let runtime = DeterministicValidationRuntime::default();
        let plan = plan_fixture();
        let scenario = UsageScenario::new(800.0, 100.0, 720.0, 3).expect("scenario");

        let first =
            runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }).expect("run a");
        let second =
            runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }).expect("run b");

        assert_eq!(first.fup, second.fup);
        assert_eq!(first.cap, second.cap);
        assert_eq!(first.window, second.window);
        assert_eq!(first.costs, second.costs);
        assert_eq!(first.report.checks, second.report.checks);
        assert_eq!(first.report.overall_status, second.report.overall_status);
    }

    #[test]
    fn terabyte_threshold_normalizes_before_simulation() {
        let runtime = DeterministicValidationRuntime::default();
        let mut plan = plan_fixture();
        plan.fup_threshold = 1.0;
        plan.fup_threshold_unit = "TB".to_string();
        let scenario = UsageScenario::new(1000.0, 20.0, 720.0, 3).expect("scenario");

        let evaluation =
            runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }).expect("evaluate");

        let fup = evaluation.fup.expect("fup analysis");
        assert_eq!(fup.fup_threshold_gb, 1024.0);
        assert!(!fup.will_trigger, "1020 GB stays under 1 TB");
    }
}

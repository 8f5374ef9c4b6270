use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanConfig;
use crate::domain::report::{CheckKind, ValidationCheck};
use crate::domain::scenario::UsageScenario;
use crate::engine::cap::CapAnalysis;
use crate::engine::fup::FupAnalysis;
use crate::engine::units::{DataUnit, NormalizedPlan, SpeedUnit};
use crate::engine::window::TimeOfDay;

pub const DEFAULT_PER_USER_MINIMUM_MBPS: f64 = 25.0;

/// Operator-tunable thresholds for the rule battery.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulePolicy {
    pub per_user_minimum_mbps: f64,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self { per_user_minimum_mbps: DEFAULT_PER_USER_MINIMUM_MBPS }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub plan: &'a PlanConfig,
    pub normalized: &'a NormalizedPlan,
    pub scenario: &'a UsageScenario,
    pub policy: &'a RulePolicy,
    pub fup: Option<&'a FupAnalysis>,
    pub cap: Option<&'a CapAnalysis>,
}

pub trait RuleEngine: Send + Sync {
    fn run(&self, ctx: &RuleContext<'_>) -> Vec<ValidationCheck>;
}

#[derive(Default)]
pub struct DeterministicRuleEngine;

impl RuleEngine for DeterministicRuleEngine {
    fn run(&self, ctx: &RuleContext<'_>) -> Vec<ValidationCheck> {
        run_checks(ctx)
    }
}

/// Runs the fixed battery in its fixed order. Aggregation downstream is
/// order-independent; the order exists only for reproducible output.
pub fn run_checks(ctx: &RuleContext<'_>) -> Vec<ValidationCheck> {
    vec![
        check_speeds(ctx.plan),
        check_data_cap(ctx.plan, ctx.cap),
        check_pricing(ctx.plan),
        check_time_restrictions(ctx.plan),
        check_qos(ctx.normalized, ctx.scenario, ctx.policy),
    ]
}

fn check_speeds(plan: &PlanConfig) -> ValidationCheck {
    if let Err(error) = SpeedUnit::parse(&plan.speed_unit) {
        return ValidationCheck::failure(CheckKind::SpeedValidation, error.to_string())
            .with_detail("speed_unit", &plan.speed_unit);
    }

    if plan.download_speed <= 0.0 || plan.upload_speed <= 0.0 {
        return ValidationCheck::failure(
            CheckKind::SpeedValidation,
            "download and upload speeds must be positive",
        )
        .with_detail("download_speed", plan.download_speed.to_string())
        .with_detail("upload_speed", plan.upload_speed.to_string());
    }

    ValidationCheck::pass(CheckKind::SpeedValidation, "advertised speeds are positive")
        .with_detail("download_speed", plan.download_speed.to_string())
        .with_detail("upload_speed", plan.upload_speed.to_string())
}

fn check_data_cap(plan: &PlanConfig, cap: Option<&CapAnalysis>) -> ValidationCheck {
    if !plan.has_data_cap {
        return ValidationCheck::pass(CheckKind::DataCapValidation, "no data cap configured");
    }

    if let Err(error) = DataUnit::parse(&plan.data_cap_unit) {
        return ValidationCheck::failure(CheckKind::DataCapValidation, error.to_string())
            .with_detail("data_cap_unit", &plan.data_cap_unit);
    }

    if plan.data_cap_amount <= 0.0 {
        return ValidationCheck::failure(
            CheckKind::DataCapValidation,
            "data cap amount must be positive when a cap is enabled",
        )
        .with_detail("data_cap_amount", plan.data_cap_amount.to_string());
    }

    if plan.overage_price_per_gb.is_none() {
        let mut check = ValidationCheck::warning(
            CheckKind::DataCapValidation,
            "overage price is not set; overage cost defaults to zero",
        );
        if let Some(analysis) = cap {
            check = check.with_detail("projected_overage_gb", analysis.overage_gb.to_string());
        }
        return check;
    }

    let mut check =
        ValidationCheck::pass(CheckKind::DataCapValidation, "data cap configuration is consistent")
            .with_detail("data_cap_amount", plan.data_cap_amount.to_string());
    if let Some(analysis) = cap {
        check = check.with_detail("will_exceed", analysis.will_exceed.to_string());
    }
    check
}

fn check_pricing(plan: &PlanConfig) -> ValidationCheck {
    if plan.monthly_price <= rust_decimal::Decimal::ZERO {
        return ValidationCheck::failure(
            CheckKind::PricingValidation,
            "monthly price must be positive",
        )
        .with_detail("monthly_price", plan.monthly_price.to_string());
    }

    if plan.currency.trim().is_empty() {
        return ValidationCheck::failure(CheckKind::PricingValidation, "currency is missing");
    }

    ValidationCheck::pass(CheckKind::PricingValidation, "pricing configuration is consistent")
        .with_detail("monthly_price", plan.monthly_price.to_string())
        .with_detail("currency", &plan.currency)
}

fn check_time_restrictions(plan: &PlanConfig) -> ValidationCheck {
    if !plan.has_time_restrictions {
        return ValidationCheck::pass(
            CheckKind::TimeRestrictionValidation,
            "no time restrictions configured",
        );
    }

    let start = match TimeOfDay::parse(&plan.unrestricted_window_start) {
        Ok(start) => start,
        Err(error) => {
            return ValidationCheck::failure(
                CheckKind::TimeRestrictionValidation,
                error.to_string(),
            )
            .with_detail("window_start", &plan.unrestricted_window_start);
        }
    };
    let end = match TimeOfDay::parse(&plan.unrestricted_window_end) {
        Ok(end) => end,
        Err(error) => {
            return ValidationCheck::failure(
                CheckKind::TimeRestrictionValidation,
                error.to_string(),
            )
            .with_detail("window_end", &plan.unrestricted_window_end);
        }
    };

    if start >= end {
        return ValidationCheck::failure(
            CheckKind::TimeRestrictionValidation,
            "unrestricted window start must be before its end",
        )
        .with_detail("window_start", start.to_string())
        .with_detail("window_end", end.to_string());
    }

    if plan.unrestricted_speed_multiplier.is_none() {
        return ValidationCheck::warning(
            CheckKind::TimeRestrictionValidation,
            "unrestricted speed multiplier is not set; defaulting to 1",
        );
    }

    ValidationCheck::pass(
        CheckKind::TimeRestrictionValidation,
        "time restriction window is consistent",
    )
    .with_detail("window_start", start.to_string())
    .with_detail("window_end", end.to_string())
}

fn check_qos(
    normalized: &NormalizedPlan,
    scenario: &UsageScenario,
    policy: &RulePolicy,
) -> ValidationCheck {
    let required_mbps = f64::from(scenario.concurrent_users()) * policy.per_user_minimum_mbps;

    if required_mbps > normalized.download_speed_mbps {
        return ValidationCheck::warning(
            CheckKind::QosValidation,
            format!(
                "{} concurrent users need {required_mbps} Mbps, plan provides {} Mbps",
                scenario.concurrent_users(),
                normalized.download_speed_mbps
            ),
        )
        .with_detail("required_mbps", required_mbps.to_string())
        .with_detail("available_mbps", normalized.download_speed_mbps.to_string());
    }

    ValidationCheck::pass(CheckKind::QosValidation, "plan bandwidth covers concurrent demand")
        .with_detail("required_mbps", required_mbps.to_string())
        .with_detail("available_mbps", normalized.download_speed_mbps.to_string())
}

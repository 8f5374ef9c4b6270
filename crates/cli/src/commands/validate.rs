use std::path::Path;

use plansim_core::{
    AppConfig, DeterministicCapEngine, DeterministicFupEngine, DeterministicRuleEngine,
    DeterministicValidationRuntime, EvaluationInput, LoadOptions, PlanEvaluation, RulePolicy,
    ValidationRuntime,
};

use crate::commands::{build_scenario, load_plan, CommandResult};

pub fn run(
    plan_path: &Path,
    scenario_path: Option<&Path>,
    preset: Option<&str>,
    duration_hours: f64,
    json: bool,
) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "validate",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let plan = match load_plan(plan_path) {
        Ok(plan) => plan,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("validate", error_class, message, exit_code);
        }
    };

    let scenario = match build_scenario(scenario_path, preset, duration_hours) {
        Ok(scenario) => scenario,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("validate", error_class, message, exit_code);
        }
    };

    let runtime = DeterministicValidationRuntime::with_policy(
        DeterministicFupEngine,
        DeterministicCapEngine,
        DeterministicRuleEngine,
        RulePolicy { per_user_minimum_mbps: config.rules.per_user_minimum_mbps },
    );

    let evaluation = match runtime.evaluate(EvaluationInput { plan: &plan, scenario: &scenario }) {
        Ok(evaluation) => evaluation,
        Err(error) => {
            return CommandResult::failure("validate", "domain", error.to_string(), 4);
        }
    };

    // A failed report is still a successful command: the report is the
    // product, carried in the payload with exit code 0.
    if json {
        let message =
            format!("validation {} for plan `{}`", evaluation.report.overall_status.as_str(), plan.id.0);
        match serde_json::to_value(&evaluation) {
            Ok(report) => CommandResult::success_with_report("validate", message, report),
            Err(error) => CommandResult::failure(
                "validate",
                "serialization",
                format!("could not serialize evaluation: {error}"),
                4,
            ),
        }
    } else {
        CommandResult::rendered(render_text(&plan.id.0, &plan.currency, &evaluation))
    }
}

fn render_text(plan_id: &str, currency: &str, evaluation: &PlanEvaluation) -> String {
    let report = &evaluation.report;
    let mut lines = Vec::new();

    lines.push(format!("Plan `{plan_id}`: {}", report.overall_status.as_str().to_uppercase()));
    lines.push(format!(
        "Checks: {} passed, {} failed, {} warnings ({} total)",
        report.passed_checks, report.failed_checks, report.warning_checks, report.total_checks
    ));

    for check in &report.checks {
        let marker = if !check.passed {
            "FAIL"
        } else if check.severity == plansim_core::Severity::Warning {
            "WARN"
        } else {
            "PASS"
        };
        lines.push(format!("  [{marker}] {}: {}", check.name.as_str(), check.message));
    }

    if let Some(fup) = &evaluation.fup {
        if fup.will_trigger {
            lines.push(format!(
                "Fair-usage throttling after {:.2} days ({:.2} days throttled)",
                fup.days_until_fup, fup.days_throttled
            ));
        } else {
            lines.push(format!(
                "Fair-usage threshold not reached ({:.1}% of the way to trigger)",
                fup.trigger_percentage
            ));
        }
    }

    if let Some(cap) = &evaluation.cap {
        if cap.will_exceed {
            lines.push(format!(
                "Data cap exceeded by {:.1} GB (overage {} {currency})",
                cap.overage_gb, cap.overage_cost
            ));
        }
    }

    if let Some(window) = &evaluation.window {
        lines.push(format!(
            "Unrestricted window {}-{}: {:.0} Mbps effective",
            window.window_start, window.window_end, window.effective_speed_mbps
        ));
    }

    lines.push(format!(
        "Estimated cost: {} {currency} ({} plan + {} overage)",
        report.total_estimated_cost(),
        report.estimated_monthly_cost,
        report.estimated_overage_cost
    ));
    lines.push(format!(
        "Speeds: {:.0}/{:.0} Mbps peak, {:.1}/{:.1} Mbps average",
        report.peak_download_speed_mbps,
        report.peak_upload_speed_mbps,
        report.average_download_speed_mbps,
        report.average_upload_speed_mbps
    ));

    lines.join("\n")
}

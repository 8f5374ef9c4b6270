use serde::{Deserialize, Serialize};

const HOURS_PER_DAY: f64 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FupInput {
    pub total_usage_gb: f64,
    pub fup_threshold_gb: f64,
    pub duration_hours: f64,
    pub normal_speed_mbps: f64,
    pub throttled_speed_mbps: f64,
}

/// Fair-usage trigger point and throttle timeline, replaced wholesale on
/// every recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FupAnalysis {
    pub fup_threshold_gb: f64,
    pub total_usage_gb: f64,
    pub trigger_percentage: f64,
    pub days_until_fup: f64,
    pub will_trigger: bool,
    pub normal_speed_mbps: f64,
    pub throttled_speed_mbps: f64,
    pub speed_reduction_pct: Option<f64>,
    pub days_throttled: f64,
}

pub trait FupEngine: Send + Sync {
    fn simulate(&self, input: &FupInput) -> FupAnalysis;
}

#[derive(Default)]
pub struct DeterministicFupEngine;

impl FupEngine for DeterministicFupEngine {
    fn simulate(&self, input: &FupInput) -> FupAnalysis {
        simulate_fup(input)
    }
}

/// Trigger rule is strict inequality: usage equal to the threshold does not
/// throttle. Zero usage is a defined policy (100%, never triggers), not a
/// division-by-zero path.
pub fn simulate_fup(input: &FupInput) -> FupAnalysis {
    let duration_days = input.duration_hours / HOURS_PER_DAY;

    if input.total_usage_gb <= 0.0 {
        return FupAnalysis {
            fup_threshold_gb: input.fup_threshold_gb,
            total_usage_gb: input.total_usage_gb,
            trigger_percentage: 100.0,
            days_until_fup: duration_days,
            will_trigger: false,
            normal_speed_mbps: input.normal_speed_mbps,
            throttled_speed_mbps: input.throttled_speed_mbps,
            speed_reduction_pct: None,
            days_throttled: 0.0,
        };
    }

    let threshold_ratio = input.fup_threshold_gb / input.total_usage_gb;
    let trigger_percentage = (threshold_ratio * 100.0).min(100.0);
    // daysUntilFup never exceeds the scenario window.
    let days_until_fup = (threshold_ratio * duration_days).min(duration_days);
    let will_trigger = input.total_usage_gb > input.fup_threshold_gb;

    let (speed_reduction_pct, days_throttled) = if will_trigger {
        let reduction = (input.normal_speed_mbps > 0.0).then(|| {
            (input.normal_speed_mbps - input.throttled_speed_mbps) / input.normal_speed_mbps
                * 100.0
        });
        (reduction, duration_days - days_until_fup)
    } else {
        (None, 0.0)
    };

    FupAnalysis {
        fup_threshold_gb: input.fup_threshold_gb,
        total_usage_gb: input.total_usage_gb,
        trigger_percentage,
        days_until_fup,
        will_trigger,
        normal_speed_mbps: input.normal_speed_mbps,
        throttled_speed_mbps: input.throttled_speed_mbps,
        speed_reduction_pct,
        days_throttled,
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapInput {
    pub total_usage_gb: f64,
    pub data_cap_gb: f64,
    pub overage_price_per_gb: Option<Decimal>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapAnalysis {
    pub data_cap_gb: f64,
    pub total_usage_gb: f64,
    pub trigger_percentage: f64,
    pub overage_gb: f64,
    pub overage_cost: Decimal,
    pub will_exceed: bool,
}

pub trait CapEngine: Send + Sync {
    fn analyze(&self, input: &CapInput) -> CapAnalysis;
}

#[derive(Default)]
pub struct DeterministicCapEngine;

impl CapEngine for DeterministicCapEngine {
    fn analyze(&self, input: &CapInput) -> CapAnalysis {
        analyze_cap(input)
    }
}

/// A missing overage price defaults to zero cost here; the rule engine
/// separately reports the missing price as a warning so the default is never
/// a silent pass.
pub fn analyze_cap(input: &CapInput) -> CapAnalysis {
    let trigger_percentage = if input.total_usage_gb > 0.0 {
        (input.data_cap_gb / input.total_usage_gb * 100.0).min(100.0)
    } else {
        100.0
    };

    let overage_gb = (input.total_usage_gb - input.data_cap_gb).max(0.0);
    let price_per_gb = input.overage_price_per_gb.unwrap_or(Decimal::ZERO);
    let overage_cost = Decimal::try_from(overage_gb).unwrap_or_default() * price_per_gb;
    let will_exceed = input.total_usage_gb > input.data_cap_gb && input.total_usage_gb > 0.0;

    CapAnalysis {
        data_cap_gb: input.data_cap_gb,
        total_usage_gb: input.total_usage_gb,
        trigger_percentage,
        overage_gb,
        overage_cost,
        will_exceed,
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

/// Action taken once the data cap is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottlePolicy {
    Throttle,
    Block,
    BillOverage,
}

impl ThrottlePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Throttle => "throttle",
            Self::Block => "block",
            Self::BillOverage => "bill_overage",
        }
    }
}

/// Plan configuration as supplied by the external plan store.
///
/// Unit fields are kept as the store's raw strings; normalization (and the
/// rejection of unknown units) happens in the engine, not at the boundary.
/// The struct is never mutated during a validation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub id: PlanId,
    pub download_speed: f64,
    pub upload_speed: f64,
    pub speed_unit: String,
    pub has_fup: bool,
    pub fup_threshold: f64,
    pub fup_threshold_unit: String,
    pub fup_throttle_speed: f64,
    pub has_data_cap: bool,
    pub data_cap_amount: f64,
    pub data_cap_unit: String,
    pub overage_price_per_gb: Option<Decimal>,
    pub throttle_policy: ThrottlePolicy,
    pub has_time_restrictions: bool,
    pub unrestricted_window_start: String,
    pub unrestricted_window_end: String,
    pub unrestricted_data_unlimited: bool,
    pub unrestricted_speed_multiplier: Option<f64>,
    pub monthly_price: Decimal,
    pub currency: String,
}

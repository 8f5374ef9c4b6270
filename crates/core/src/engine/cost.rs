use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::cap::CapAnalysis;
use crate::engine::fup::FupAnalysis;

#[derive(Clone, Copy, Debug)]
pub struct CostInput<'a> {
    pub monthly_price: Decimal,
    pub download_speed_mbps: f64,
    pub upload_speed_mbps: f64,
    pub fup: Option<&'a FupAnalysis>,
    pub cap: Option<&'a CapAnalysis>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub estimated_monthly_cost: Decimal,
    pub estimated_overage_cost: Decimal,
    pub total_estimated_cost: Decimal,
    pub peak_download_speed_mbps: f64,
    pub average_download_speed_mbps: f64,
    pub peak_upload_speed_mbps: f64,
    pub average_upload_speed_mbps: f64,
}

/// Peak speed is always the normal speed: it is achieved before the trigger
/// point even when fair-usage throttling kicks in later.
pub fn summarize_costs(input: &CostInput<'_>) -> CostSummary {
    let estimated_overage_cost =
        input.cap.map(|cap| cap.overage_cost).unwrap_or(Decimal::ZERO);
    let total_estimated_cost = input.monthly_price + estimated_overage_cost;

    let average_download_speed_mbps =
        average_speed(input.fup, input.download_speed_mbps, input.download_speed_mbps);
    let average_upload_speed_mbps =
        average_speed(input.fup, input.upload_speed_mbps, input.upload_speed_mbps);

    CostSummary {
        estimated_monthly_cost: input.monthly_price,
        estimated_overage_cost,
        total_estimated_cost,
        peak_download_speed_mbps: input.download_speed_mbps,
        average_download_speed_mbps,
        peak_upload_speed_mbps: input.upload_speed_mbps,
        average_upload_speed_mbps,
    }
}

/// Duration-weighted average over the throttle timeline. The throttle speed
/// is capped at the link's own speed so a slow upload link is never reported
/// faster while "throttled".
fn average_speed(fup: Option<&FupAnalysis>, normal_speed_mbps: f64, link_cap_mbps: f64) -> f64 {
    let Some(analysis) = fup else {
        return normal_speed_mbps;
    };
    if !analysis.will_trigger {
        return normal_speed_mbps;
    }

    let total_days = analysis.days_until_fup + analysis.days_throttled;
    if total_days <= 0.0 {
        return normal_speed_mbps;
    }

    let throttled = analysis.throttled_speed_mbps.min(link_cap_mbps);
    (analysis.days_until_fup * normal_speed_mbps + analysis.days_throttled * throttled)
        / total_days
}

use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanConfig;
use crate::errors::DomainError;

const MB_PER_GB: f64 = 1024.0;
const GB_PER_TB: f64 = 1024.0;
const MBPS_PER_GBPS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataUnit {
    Megabytes,
    Gigabytes,
    Terabytes,
}

impl DataUnit {
    /// Unit strings come from the external plan store; anything outside
    /// MB/GB/TB is rejected, never defaulted.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "MB" => Ok(Self::Megabytes),
            "GB" => Ok(Self::Gigabytes),
            "TB" => Ok(Self::Terabytes),
            _ => Err(DomainError::InvalidUnit(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
            Self::Terabytes => "TB",
        }
    }

    fn gb_factor(&self) -> f64 {
        match self {
            Self::Megabytes => 1.0 / MB_PER_GB,
            Self::Gigabytes => 1.0,
            Self::Terabytes => GB_PER_TB,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    Mbps,
    Gbps,
}

impl SpeedUnit {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mbps" => Ok(Self::Mbps),
            "gbps" => Ok(Self::Gbps),
            _ => Err(DomainError::InvalidSpeedUnit(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mbps => "Mbps",
            Self::Gbps => "Gbps",
        }
    }

    fn mbps_factor(&self) -> f64 {
        match self {
            Self::Mbps => 1.0,
            Self::Gbps => MBPS_PER_GBPS,
        }
    }
}

/// Converts a data amount to the canonical base unit (GB). Sign is preserved;
/// non-positive amounts are the rule engine's concern, not the normalizer's.
pub fn normalize_to_gb(amount: f64, unit: DataUnit) -> f64 {
    amount * unit.gb_factor()
}

/// Parses the raw unit string and converts in one step.
pub fn normalize_raw_to_gb(amount: f64, unit: &str) -> Result<f64, DomainError> {
    Ok(normalize_to_gb(amount, DataUnit::parse(unit)?))
}

pub fn normalize_to_mbps(speed: f64, unit: SpeedUnit) -> f64 {
    speed * unit.mbps_factor()
}

/// Plan quantities after normalization: all volumes in GB, all speeds in
/// Mbps. Built once per validation run; the raw `PlanConfig` stays untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPlan {
    pub download_speed_mbps: f64,
    pub upload_speed_mbps: f64,
    pub fup_threshold_gb: f64,
    pub fup_throttle_speed_mbps: f64,
    pub data_cap_gb: f64,
}

impl NormalizedPlan {
    pub fn from_plan(plan: &PlanConfig) -> Result<Self, DomainError> {
        let speed_unit = SpeedUnit::parse(&plan.speed_unit)?;

        let fup_threshold_gb = if plan.has_fup {
            normalize_raw_to_gb(plan.fup_threshold, &plan.fup_threshold_unit)?
        } else {
            0.0
        };

        let data_cap_gb = if plan.has_data_cap {
            normalize_raw_to_gb(plan.data_cap_amount, &plan.data_cap_unit)?
        } else {
            0.0
        };

        Ok(Self {
            download_speed_mbps: normalize_to_mbps(plan.download_speed, speed_unit),
            upload_speed_mbps: normalize_to_mbps(plan.upload_speed, speed_unit),
            fup_threshold_gb,
            fup_throttle_speed_mbps: normalize_to_mbps(plan.fup_throttle_speed, speed_unit),
            data_cap_gb,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_raw_to_gb, normalize_to_gb, DataUnit, SpeedUnit};
    use crate::errors::DomainError;

    #[test]
    fn terabytes_scale_up_and_megabytes_scale_down() {
        assert_eq!(normalize_to_gb(1.0, DataUnit::Terabytes), 1024.0);
        assert_eq!(normalize_to_gb(1024.0, DataUnit::Megabytes), 1.0);
        assert_eq!(normalize_to_gb(500.0, DataUnit::Gigabytes), 500.0);
    }

    #[test]
    fn unit_parsing_is_case_insensitive() {
        assert_eq!(DataUnit::parse(" tb ").expect("parse tb"), DataUnit::Terabytes);
        assert_eq!(DataUnit::parse("mb").expect("parse mb"), DataUnit::Megabytes);
        assert_eq!(SpeedUnit::parse("GBPS").expect("parse gbps"), SpeedUnit::Gbps);
    }

    #[test]
    fn unknown_unit_fails_without_fallback() {
        let error = normalize_raw_to_gb(1.0, "PB").expect_err("must reject");
        assert_eq!(error, DomainError::InvalidUnit("PB".to_string()));

        let error = SpeedUnit::parse("kbps").expect_err("must reject");
        assert_eq!(error, DomainError::InvalidSpeedUnit("kbps".to_string()));
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(normalize_to_gb(-1.0, DataUnit::Terabytes), -1024.0);
    }
}

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("unrecognized data unit `{0}` (expected MB|GB|TB)")]
    InvalidUnit(String),
    #[error("unrecognized speed unit `{0}` (expected Mbps|Gbps)")]
    InvalidSpeedUnit(String),
    #[error("invalid time of day `{0}` (expected HH:MM)")]
    InvalidTimeOfDay(String),
    #[error("scenario duration must be positive, got {0} hours")]
    NonPositiveDuration(f64),
    #[error("scenario requires at least one concurrent user")]
    NoConcurrentUsers,
    #[error("unknown scenario preset `{0}`")]
    UnknownPreset(String),
}

#[cfg(test)]
mod tests {
    use super::DomainError;

    #[test]
    fn invalid_unit_message_names_the_offending_string() {
        let error = DomainError::InvalidUnit("PB".to_string());
        assert_eq!(error.to_string(), "unrecognized data unit `PB` (expected MB|GB|TB)");
    }

    #[test]
    fn non_positive_duration_carries_the_value() {
        let error = DomainError::NonPositiveDuration(0.0);
        assert!(error.to_string().contains("0 hours"));
    }
}

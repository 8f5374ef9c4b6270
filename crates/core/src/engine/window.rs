use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Parses `"HH:MM"` wall-clock strings from the plan store.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTimeOfDay(raw.to_string());
        let (hour_part, minute_part) = raw.trim().split_once(':').ok_or_else(invalid)?;

        let hour: u8 = hour_part.parse().map_err(|_| invalid())?;
        let minute: u8 = minute_part.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowInput {
    pub window_start: TimeOfDay,
    pub window_end: TimeOfDay,
    pub unlimited: bool,
    pub speed_multiplier: Option<f64>,
    pub base_speed_mbps: f64,
}

/// Descriptive record of the unrestricted time-of-day window. The window is
/// evaluated in isolation: its traffic is not excluded from the day-level
/// FUP/cap usage totals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowEvaluation {
    pub window_start: TimeOfDay,
    pub window_end: TimeOfDay,
    pub speed_multiplier: f64,
    pub multiplier_defaulted: bool,
    pub effective_speed_mbps: f64,
    pub cap_bypassed_during_window: bool,
}

/// A missing multiplier defaults to 1; the rule engine surfaces the default
/// as a warning rather than letting it pass silently.
pub fn evaluate_window(input: &WindowInput) -> WindowEvaluation {
    let multiplier_defaulted = input.speed_multiplier.is_none();
    let speed_multiplier = input.speed_multiplier.unwrap_or(1.0);

    WindowEvaluation {
        window_start: input.window_start,
        window_end: input.window_end,
        speed_multiplier,
        multiplier_defaulted,
        effective_speed_mbps: input.base_speed_mbps * speed_multiplier,
        cap_bypassed_during_window: input.unlimited,
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const CUSTOM_LABEL: &str = "custom";

/// Projected usage over a billing window, owned and edited by the caller.
///
/// Fields are private so the label contract cannot be bypassed: any manual
/// numeric edit flips the label to `"custom"`, while preset application
/// overwrites volume fields and the label in one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageScenario {
    download_gb: f64,
    upload_gb: f64,
    duration_hours: f64,
    concurrent_users: u32,
    label: String,
}

impl UsageScenario {
    pub fn new(
        download_gb: f64,
        upload_gb: f64,
        duration_hours: f64,
        concurrent_users: u32,
    ) -> Result<Self, DomainError> {
        if duration_hours <= 0.0 {
            return Err(DomainError::NonPositiveDuration(duration_hours));
        }
        if concurrent_users == 0 {
            return Err(DomainError::NoConcurrentUsers);
        }

        Ok(Self {
            download_gb,
            upload_gb,
            duration_hours,
            concurrent_users,
            label: CUSTOM_LABEL.to_string(),
        })
    }

    pub fn download_gb(&self) -> f64 {
        self.download_gb
    }

    pub fn upload_gb(&self) -> f64 {
        self.upload_gb
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn duration_days(&self) -> f64 {
        self.duration_hours / 24.0
    }

    pub fn concurrent_users(&self) -> u32 {
        self.concurrent_users
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total_usage_gb(&self) -> f64 {
        self.download_gb + self.upload_gb
    }

    pub fn set_download_gb(&mut self, download_gb: f64) {
        self.download_gb = download_gb;
        self.label = CUSTOM_LABEL.to_string();
    }

    pub fn set_upload_gb(&mut self, upload_gb: f64) {
        self.upload_gb = upload_gb;
        self.label = CUSTOM_LABEL.to_string();
    }

    pub fn set_duration_hours(&mut self, duration_hours: f64) -> Result<(), DomainError> {
        if duration_hours <= 0.0 {
            return Err(DomainError::NonPositiveDuration(duration_hours));
        }
        self.duration_hours = duration_hours;
        self.label = CUSTOM_LABEL.to_string();
        Ok(())
    }

    pub fn set_concurrent_users(&mut self, concurrent_users: u32) -> Result<(), DomainError> {
        if concurrent_users == 0 {
            return Err(DomainError::NoConcurrentUsers);
        }
        self.concurrent_users = concurrent_users;
        self.label = CUSTOM_LABEL.to_string();
        Ok(())
    }

    /// Re-checks invariants after deserialization from an untrusted source.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.duration_hours <= 0.0 {
            return Err(DomainError::NonPositiveDuration(self.duration_hours));
        }
        if self.concurrent_users == 0 {
            return Err(DomainError::NoConcurrentUsers);
        }
        Ok(())
    }

    pub(crate) fn overwrite_from_preset(
        &mut self,
        download_gb: f64,
        upload_gb: f64,
        concurrent_users: u32,
        label: &str,
    ) {
        self.download_gb = download_gb;
        self.upload_gb = upload_gb;
        self.concurrent_users = concurrent_users;
        self.label = label.to_string();
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::scenario::UsageScenario;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    Light,
    Moderate,
    Heavy,
    Custom,
}

impl PresetKind {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "heavy" => Ok(Self::Heavy),
            "custom" => Ok(Self::Custom),
            _ => Err(DomainError::UnknownPreset(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
            Self::Custom => "custom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScenarioPreset {
    pub kind: PresetKind,
    pub download_gb: f64,
    pub upload_gb: f64,
    pub concurrent_users: u32,
    pub description: &'static str,
}

const CATALOG: [ScenarioPreset; 4] = [
    ScenarioPreset {
        kind: PresetKind::Light,
        download_gb: 100.0,
        upload_gb: 10.0,
        concurrent_users: 1,
        description: "Browsing, mail, and occasional streaming for one user",
    },
    ScenarioPreset {
        kind: PresetKind::Moderate,
        download_gb: 300.0,
        upload_gb: 50.0,
        concurrent_users: 3,
        description: "Daily streaming and home-office traffic for a small household",
    },
    ScenarioPreset {
        kind: PresetKind::Heavy,
        download_gb: 800.0,
        upload_gb: 150.0,
        concurrent_users: 5,
        description: "4K streaming, gaming, and large downloads for a full household",
    },
    ScenarioPreset {
        kind: PresetKind::Custom,
        download_gb: 2000.0,
        upload_gb: 500.0,
        concurrent_users: 10,
        description: "Power-user starting point for manual adjustment",
    },
];

pub fn catalog() -> &'static [ScenarioPreset] {
    &CATALOG
}

pub fn preset(kind: PresetKind) -> &'static ScenarioPreset {
    CATALOG
        .iter()
        .find(|entry| entry.kind == kind)
        .unwrap_or(&CATALOG[0])
}

impl ScenarioPreset {
    /// Overwrites volume fields and the label in one step; duration is not
    /// part of any preset and stays as the caller set it.
    pub fn apply(&self, scenario: &mut UsageScenario) {
        scenario.overwrite_from_preset(
            self.download_gb,
            self.upload_gb,
            self.concurrent_users,
            self.kind.as_str(),
        );
    }
}

/// Builds a scenario seeded from a preset.
pub fn scenario_from_preset(
    kind: PresetKind,
    duration_hours: f64,
) -> Result<UsageScenario, DomainError> {
    let entry = preset(kind);
    let mut scenario =
        UsageScenario::new(entry.download_gb, entry.upload_gb, duration_hours, entry.concurrent_users)?;
    entry.apply(&mut scenario);
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::{catalog, preset, scenario_from_preset, PresetKind};
    use crate::domain::scenario::CUSTOM_LABEL;
    use crate::errors::DomainError;

    #[test]
    fn catalog_carries_the_four_fixed_presets() {
        let entries = catalog();
        assert_eq!(entries.len(), 4);

        let light = preset(PresetKind::Light);
        assert_eq!((light.download_gb, light.upload_gb, light.concurrent_users), (100.0, 10.0, 1));

        let heavy = preset(PresetKind::Heavy);
        assert_eq!((heavy.download_gb, heavy.upload_gb, heavy.concurrent_users), (800.0, 150.0, 5));
    }

    #[test]
    fn preset_application_is_atomic_and_labels_the_scenario() {
        let mut scenario = scenario_from_preset(PresetKind::Light, 720.0).expect("scenario");
        assert_eq!(scenario.label(), "light");

        preset(PresetKind::Moderate).apply(&mut scenario);
        assert_eq!(scenario.label(), "moderate");
        assert_eq!(scenario.download_gb(), 300.0);
        assert_eq!(scenario.upload_gb(), 50.0);
        assert_eq!(scenario.concurrent_users(), 3);
        assert_eq!(scenario.duration_hours(), 720.0, "duration is untouched");
    }

    #[test]
    fn edit_after_preset_selection_reverts_label_to_custom() {
        let mut scenario = scenario_from_preset(PresetKind::Heavy, 720.0).expect("scenario");
        scenario.set_upload_gb(151.0);
        assert_eq!(scenario.label(), CUSTOM_LABEL);
    }

    #[test]
    fn unknown_preset_name_is_rejected() {
        let error = PresetKind::parse("extreme").expect_err("must reject");
        assert_eq!(error, DomainError::UnknownPreset("extreme".to_string()));
        assert_eq!(PresetKind::parse(" Heavy ").expect("parse"), PresetKind::Heavy);
    }
}

//! Daily goal and preset amounts, persisted as JSON alongside the user
//! record. The aggregation engine never reads these; callers fetch the
//! goal themselves and compare it against derived totals.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::WaterlogError;
use crate::utils::{data_dir, ensure_dir};

const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "json.tmp";

/// Factory preset amounts, in fluid ounces.
pub const DEFAULT_PRESETS: [f64; 3] = [8.0, 17.0, 23.0];
/// Factory daily goal, in fluid ounces.
pub const DEFAULT_GOAL: f64 = 64.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub goal: f64,
    pub presets: [f64; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            presets: DEFAULT_PRESETS,
        }
    }
}

pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Result<Self, WaterlogError> {
        Self::from_base(data_dir())
    }

    pub fn from_base(base: PathBuf) -> Result<Self, WaterlogError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(SETTINGS_FILE),
        })
    }

    /// Loads the persisted settings, falling back to factory defaults
    /// when no file exists yet.
    pub fn load(&self) -> Result<Settings, WaterlogError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), WaterlogError> {
        validate(settings)?;
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn set_goal(&self, goal: f64) -> Result<Settings, WaterlogError> {
        let mut settings = self.load()?;
        settings.goal = goal;
        self.save(&settings)?;
        tracing::info!(goal, "updated daily goal");
        Ok(settings)
    }

    pub fn set_presets(&self, presets: [f64; 3]) -> Result<Settings, WaterlogError> {
        let mut settings = self.load()?;
        settings.presets = presets;
        self.save(&settings)?;
        tracing::info!(?presets, "updated preset amounts");
        Ok(settings)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate(settings: &Settings) -> Result<(), WaterlogError> {
    if !settings.goal.is_finite() || settings.goal <= 0.0 {
        return Err(WaterlogError::Validation(format!(
            "goal must be positive, got {}",
            settings.goal
        )));
    }
    for value in settings.presets {
        if !value.is_finite() || value <= 0.0 {
            return Err(WaterlogError::Validation(format!(
                "preset must be positive, got {value}"
            )));
        }
    }
    Ok(())
}

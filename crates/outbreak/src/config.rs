use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Every tunable constant of the engine.
///
/// Missing fields in a config file fall back to the defaults below, so a file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub onset: OnsetConfig,
    pub playback: PlaybackConfig,
    pub intensity: IntensityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnsetConfig {
    /// Radius of the globe the markers are placed on (scene units).
    pub globe_radius: f64,
    /// Great-circle distance the outbreak covers per simulated day.
    pub km_per_day: f64,
    /// Hubs never become active before this day.
    pub hub_min_onset_day: f64,
    /// Hubs see this fraction of their raw distance delay.
    pub hub_delay_factor: f64,
    /// Jitter is a whole number of days in `0..jitter_span_days`.
    pub jitter_span_days: u32,
    pub origin_scale: f64,
    pub hub_scale: f64,
    pub normal_scale: f64,
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            globe_radius: 80.0,
            km_per_day: 150.0,
            hub_min_onset_day: 10.0,
            hub_delay_factor: 0.5,
            jitter_span_days: 15,
            origin_scale: 2.5,
            hub_scale: 2.0,
            normal_scale: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Days advanced per frame at 1x speed.
    pub base_advance_per_frame: f64,
    /// Speed requests below this are raised to it.
    pub min_speed_multiplier: f64,
}

impl PlaybackConfig {
    /// Both rates must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), LoadError> {
        positive("playback.base_advance_per_frame", self.base_advance_per_frame)?;
        positive("playback.min_speed_multiplier", self.min_speed_multiplier)
    }
}

fn positive(field: &str, value: f64) -> Result<(), LoadError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(LoadError::InvalidConfig {
        field: field.to_string(),
        reason: format!("must be a positive number, got {value}"),
    })
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_advance_per_frame: 0.1,
            min_speed_multiplier: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityConfig {
    /// Simulated days from onset to full intensity.
    pub ramp_days: f64,
    /// Multiplies wall-clock seconds before they enter the pulse oscillator.
    pub pulse_clock_scale: f64,
    pub pulse_amplitude: f64,
    /// Extra pulse frequency at full progress (`1 + gain * progress`).
    pub pulse_speed_gain: f64,
    /// Scale reported for markers that are not active yet.
    pub hidden_scale: f64,
    pub hue_start: f64,
    pub hue_span: f64,
    /// Progress is multiplied by this before driving the hue, then capped at 1.
    pub hue_progress_gain: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub base_opacity: f64,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        Self {
            ramp_days: 100.0,
            pulse_clock_scale: 3.0,
            pulse_amplitude: 0.3,
            pulse_speed_gain: 3.0,
            hidden_scale: 0.1,
            hue_start: 0.95,
            hue_span: 0.4,
            hue_progress_gain: 1.5,
            saturation: 1.0,
            lightness: 0.5,
            base_opacity: 0.6,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validated()
    }

    pub fn validated(self) -> Result<Self, LoadError> {
        self.playback.validate()?;
        Ok(self)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineConfig, PlaybackConfig};
    use crate::error::LoadError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_all_defaults() {
        let cfg = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg =
            EngineConfig::from_json_str(r#"{ "playback": { "base_advance_per_frame": 0.5 } }"#)
                .unwrap();
        assert_eq!(cfg.playback.base_advance_per_frame, 0.5);
        assert_eq!(cfg.playback.min_speed_multiplier, 0.05);
        assert_eq!(cfg.onset, EngineConfig::default().onset);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(EngineConfig::from_json_str(r#"{ "onset": { "km_per_day": "far" } }"#).is_err());
    }

    #[test]
    fn rejects_backwards_advance() {
        let err =
            EngineConfig::from_json_str(r#"{ "playback": { "base_advance_per_frame": -0.1 } }"#)
                .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidConfig { ref field, .. } if field == "playback.base_advance_per_frame"
        ));
    }

    #[test]
    fn rejects_zero_minimum_speed() {
        let err =
            EngineConfig::from_json_str(r#"{ "playback": { "min_speed_multiplier": 0.0 } }"#)
                .unwrap_err();
        assert_eq!(
            err.to_string(),
            "config field playback.min_speed_multiplier is invalid: \
             must be a positive number, got 0"
        );
    }

    #[test]
    fn default_playback_is_valid() {
        assert_eq!(PlaybackConfig::default().validate(), Ok(()));
        let zero = PlaybackConfig {
            base_advance_per_frame: 0.0,
            ..PlaybackConfig::default()
        };
        assert!(zero.validate().is_err());
    }
}

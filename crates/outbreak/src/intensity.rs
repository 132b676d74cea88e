use foundation::color::Hsl;
use foundation::time::Time;

use crate::config::IntensityConfig;
use crate::onset::OnsetRecord;

/// What the renderer should do with one marker this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerVisual {
    pub visible: bool,
    pub scale: f64,
    pub hue: f64,
    pub opacity: f64,
    /// `hue` at the configured saturation and lightness, as linear RGB.
    pub rgb: [f64; 3],
}

/// Maps simulation progress and the wall clock to marker appearance.
///
/// The two clocks stay separate: `cursor_day` decides whether and how far an
/// entity has progressed, `wall_clock` only drives the pulse. Given both, the
/// output is fully determined.
#[derive(Debug, Clone)]
pub struct IntensityMapper {
    cfg: IntensityConfig,
}

impl IntensityMapper {
    pub fn new(cfg: IntensityConfig) -> Self {
        Self { cfg }
    }

    /// Progress in `[0, 1]` once `cursor_day` has passed `onset_day`, `None` before.
    pub fn infection_progress(&self, onset_day: f64, cursor_day: f64) -> Option<f64> {
        if cursor_day <= onset_day {
            return None;
        }
        if self.cfg.ramp_days <= 0.0 {
            return Some(1.0);
        }
        Some(((cursor_day - onset_day) / self.cfg.ramp_days).min(1.0))
    }

    /// Oscillates around 1 with the configured amplitude. Faster as progress grows.
    pub fn pulse(&self, progress: f64, wall_clock: Time, phase: f64) -> f64 {
        let speed = 1.0 + progress * self.cfg.pulse_speed_gain;
        let t = wall_clock.seconds() * self.cfg.pulse_clock_scale;
        (t * speed + phase).sin() * self.cfg.pulse_amplitude + 1.0
    }

    pub fn hue(&self, progress: f64) -> f64 {
        let ramp = (progress * self.cfg.hue_progress_gain).min(1.0);
        self.cfg.hue_start - ramp * self.cfg.hue_span
    }

    pub fn opacity(&self, progress: f64) -> f64 {
        self.cfg.base_opacity + (1.0 - self.cfg.base_opacity) * progress
    }

    pub fn hidden(&self) -> MarkerVisual {
        MarkerVisual {
            visible: false,
            scale: self.cfg.hidden_scale,
            hue: self.cfg.hue_start,
            opacity: 0.0,
            rgb: self.rgb(self.cfg.hue_start),
        }
    }

    pub fn map(
        &self,
        onset: &OnsetRecord,
        phase: f64,
        cursor_day: f64,
        wall_clock: Time,
    ) -> MarkerVisual {
        let Some(progress) = self.infection_progress(onset.onset_day, cursor_day) else {
            return self.hidden();
        };

        let pulse = self.pulse(progress, wall_clock, phase);
        let hue = self.hue(progress);

        MarkerVisual {
            visible: true,
            scale: onset.base_intensity_scale * (0.2 + 0.8 * progress) * pulse,
            hue,
            opacity: self.opacity(progress),
            rgb: self.rgb(hue),
        }
    }

    fn rgb(&self, hue: f64) -> [f64; 3] {
        Hsl::new(hue, self.cfg.saturation, self.cfg.lightness).to_rgb()
    }
}

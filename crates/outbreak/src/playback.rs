use foundation::time::DayRange;

use crate::config::PlaybackConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
}

/// Speed choices offered to users. Any positive multiplier is accepted by
/// [`PlaybackController::set_speed`]; these are just the stock buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpeedPreset {
    Half,
    Normal,
    Double,
    Quadruple,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 4] = [
        SpeedPreset::Half,
        SpeedPreset::Normal,
        SpeedPreset::Double,
        SpeedPreset::Quadruple,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            SpeedPreset::Half => 0.5,
            SpeedPreset::Normal => 1.0,
            SpeedPreset::Double => 2.0,
            SpeedPreset::Quadruple => 4.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Half => "0.5x",
            SpeedPreset::Normal => "1x",
            SpeedPreset::Double => "2x",
            SpeedPreset::Quadruple => "4x",
        }
    }
}

/// A state change worth reporting to collaborators and the event log.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    Played,
    Paused,
    /// The cursor reached the last day while playing.
    AutoStopped { day: f64 },
    Scrubbed { day: f64, interrupted: bool },
    SpeedChanged { multiplier: f64 },
}

impl PlaybackEvent {
    /// Whether the play/pause indicator needs updating.
    pub fn changes_play_state(&self) -> bool {
        match self {
            PlaybackEvent::Played | PlaybackEvent::Paused | PlaybackEvent::AutoStopped { .. } => {
                true
            }
            PlaybackEvent::Scrubbed { interrupted, .. } => *interrupted,
            PlaybackEvent::SpeedChanged { .. } => false,
        }
    }
}

/// Cursor, play state and speed for one visualization.
///
/// The cursor always lies in `[0, last_day]`. Playback never loops: reaching
/// the end stops it, and any scrub stops it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackController {
    range: DayRange,
    cursor_day: f64,
    state: PlayState,
    speed_multiplier: f64,
    base_advance: f64,
    min_speed: f64,
}

impl PlaybackController {
    /// Starts stopped at the beginning of `range`.
    ///
    /// Rates that fail [`PlaybackConfig::validate`] fall back to the defaults, so the
    /// cursor only ever moves forward inside `range`.
    pub fn new(range: DayRange, cfg: &PlaybackConfig) -> Self {
        let fallback = PlaybackConfig::default();
        let cfg = if cfg.validate().is_ok() { cfg } else { &fallback };
        Self {
            range,
            cursor_day: range.start,
            state: PlayState::Stopped,
            speed_multiplier: 1.0,
            base_advance: cfg.base_advance_per_frame,
            min_speed: cfg.min_speed_multiplier,
        }
    }

    pub fn cursor_day(&self) -> f64 {
        self.cursor_day
    }

    pub fn day_floor(&self) -> u64 {
        self.cursor_day.floor() as u64
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn last_day(&self) -> f64 {
        self.range.end
    }

    /// Days the cursor moves per playing frame at the current speed.
    pub fn advance_per_frame(&self) -> f64 {
        self.base_advance * self.speed_multiplier
    }

    pub fn toggle_play(&mut self) -> PlaybackEvent {
        match self.state {
            PlayState::Stopped => {
                self.state = PlayState::Playing;
                PlaybackEvent::Played
            }
            PlayState::Playing => {
                self.state = PlayState::Stopped;
                PlaybackEvent::Paused
            }
        }
    }

    /// Advances the cursor by one frame if playing.
    ///
    /// Returns `AutoStopped` on the tick that reaches the last day.
    pub fn on_frame_tick(&mut self) -> Option<PlaybackEvent> {
        if self.state != PlayState::Playing {
            return None;
        }
        let next = self.cursor_day + self.advance_per_frame();
        if next >= self.range.end {
            self.cursor_day = self.range.end;
            self.state = PlayState::Stopped;
            return Some(PlaybackEvent::AutoStopped {
                day: self.cursor_day,
            });
        }
        self.cursor_day = next;
        None
    }

    /// Moves the cursor to `day` (clamped) and stops playback.
    pub fn on_scrub(&mut self, day: f64) -> PlaybackEvent {
        let interrupted = self.state == PlayState::Playing;
        self.state = PlayState::Stopped;
        self.cursor_day = self.range.clamp(day);
        PlaybackEvent::Scrubbed {
            day: self.cursor_day,
            interrupted,
        }
    }

    /// Changes speed without touching play state.
    ///
    /// Non-finite requests are ignored; anything below the configured minimum
    /// is raised to it.
    pub fn set_speed(&mut self, multiplier: f64) -> Option<PlaybackEvent> {
        if !multiplier.is_finite() {
            return None;
        }
        self.speed_multiplier = multiplier.max(self.min_speed);
        Some(PlaybackEvent::SpeedChanged {
            multiplier: self.speed_multiplier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayState, PlaybackController, PlaybackEvent, SpeedPreset};
    use crate::config::PlaybackConfig;
    use foundation::time::DayRange;

    fn controller(last_day: f64) -> PlaybackController {
        PlaybackController::new(DayRange::up_to(last_day), &PlaybackConfig::default())
    }

    #[test]
    fn starts_stopped_at_zero() {
        let pc = controller(10.0);
        assert_eq!(pc.state(), PlayState::Stopped);
        assert_eq!(pc.cursor_day(), 0.0);
        assert_eq!(pc.speed_multiplier(), 1.0);
    }

    #[test]
    fn ticks_do_nothing_while_stopped() {
        let mut pc = controller(10.0);
        for _ in 0..5 {
            assert_eq!(pc.on_frame_tick(), None);
        }
        assert_eq!(pc.cursor_day(), 0.0);
    }

    #[test]
    fn plays_monotonically_to_the_end_then_stops() {
        let mut pc = controller(2.0);
        assert_eq!(pc.toggle_play(), PlaybackEvent::Played);

        let mut prev = pc.cursor_day();
        let mut stopped_at = None;
        for frame in 0..100 {
            if let Some(ev) = pc.on_frame_tick() {
                assert_eq!(ev, PlaybackEvent::AutoStopped { day: 2.0 });
                stopped_at = Some(frame);
                break;
            }
            assert!(pc.cursor_day() > prev);
            prev = pc.cursor_day();
        }

        assert!(stopped_at.is_some());
        assert_eq!(pc.cursor_day(), 2.0);
        assert_eq!(pc.state(), PlayState::Stopped);

        for _ in 0..10 {
            assert_eq!(pc.on_frame_tick(), None);
        }
        assert_eq!(pc.cursor_day(), 2.0);
    }

    #[test]
    fn playing_from_the_end_stops_on_next_tick() {
        let mut pc = controller(3.0);
        pc.on_scrub(3.0);
        pc.toggle_play();
        assert_eq!(
            pc.on_frame_tick(),
            Some(PlaybackEvent::AutoStopped { day: 3.0 })
        );
        assert!(!pc.is_playing());
    }

    #[test]
    fn scrub_cancels_playback_and_clamps() {
        let mut pc = controller(10.0);
        pc.toggle_play();
        pc.on_frame_tick();
        assert_eq!(
            pc.on_scrub(42.0),
            PlaybackEvent::Scrubbed {
                day: 10.0,
                interrupted: true
            }
        );
        assert_eq!(pc.state(), PlayState::Stopped);

        assert_eq!(
            pc.on_scrub(-1.0),
            PlaybackEvent::Scrubbed {
                day: 0.0,
                interrupted: false
            }
        );
        pc.on_scrub(f64::NAN);
        assert_eq!(pc.cursor_day(), 0.0);
        pc.on_scrub(4.25);
        assert_eq!(pc.cursor_day(), 4.25);
        assert_eq!(pc.day_floor(), 4);
    }

    #[test]
    fn speed_scales_advance_without_changing_state() {
        let mut pc = controller(100.0);
        pc.set_speed(SpeedPreset::Quadruple.multiplier());
        assert_eq!(pc.state(), PlayState::Stopped);
        pc.toggle_play();
        pc.on_frame_tick();
        assert!((pc.cursor_day() - 0.4).abs() < 1e-12);

        pc.set_speed(0.5);
        assert!(pc.is_playing());
        pc.on_frame_tick();
        assert!((pc.cursor_day() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn bad_speeds_are_clamped_or_ignored() {
        let mut pc = controller(10.0);
        assert_eq!(pc.set_speed(f64::NAN), None);
        assert_eq!(pc.speed_multiplier(), 1.0);
        assert_eq!(
            pc.set_speed(-3.0),
            Some(PlaybackEvent::SpeedChanged { multiplier: 0.05 })
        );
        assert!(pc.advance_per_frame() > 0.0);
    }

    #[test]
    fn empty_range_stops_immediately() {
        let mut pc = controller(0.0);
        pc.toggle_play();
        assert_eq!(
            pc.on_frame_tick(),
            Some(PlaybackEvent::AutoStopped { day: 0.0 })
        );
        assert_eq!(pc.cursor_day(), 0.0);
    }

    #[test]
    fn indicator_changes() {
        assert!(PlaybackEvent::Played.changes_play_state());
        assert!(PlaybackEvent::AutoStopped { day: 1.0 }.changes_play_state());
        assert!(
            !PlaybackEvent::Scrubbed {
                day: 1.0,
                interrupted: false
            }
            .changes_play_state()
        );
        assert!(!PlaybackEvent::SpeedChanged { multiplier: 2.0 }.changes_play_state());
    }

    #[test]
    fn presets_are_labelled() {
        let labels: Vec<&str> = SpeedPreset::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["0.5x", "1x", "2x", "4x"]);
    }

    #[test]
    fn unusable_rates_fall_back_to_defaults() {
        let cfg = PlaybackConfig {
            base_advance_per_frame: -0.1,
            min_speed_multiplier: 0.0,
        };
        let mut pc = PlaybackController::new(DayRange::up_to(1.0), &cfg);
        assert_eq!(pc.advance_per_frame(), 0.1);

        pc.toggle_play();
        for _ in 0..5 {
            pc.on_frame_tick();
            assert!(pc.cursor_day() >= 0.0);
        }
        assert!((pc.cursor_day() - 0.5).abs() < 1e-12);

        assert_eq!(
            pc.set_speed(0.0),
            Some(PlaybackEvent::SpeedChanged { multiplier: 0.05 })
        );
        let mut ticks = 0;
        while pc.is_playing() {
            pc.on_frame_tick();
            ticks += 1;
            assert!(ticks < 1_000, "playback never reached the end");
        }
        assert_eq!(pc.cursor_day(), 1.0);
    }
}

use foundation::time::Time;
use runtime::{EventBus, Frame, Stamped};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::entity::EntityId;
use crate::error::SinkError;
use crate::intensity::{IntensityMapper, MarkerVisual};
use crate::playback::{PlaybackController, PlaybackEvent};
use crate::session::Session;
use crate::viewport::Viewport;

/// Aggregate numbers for the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub date_label: String,
    pub cases: f64,
    pub deaths: f64,
    pub day_floor: u64,
    pub active_entities: usize,
}

/// Everything computed for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame_index: u64,
    pub cursor_day: f64,
    pub playing: bool,
    pub summary: FrameSummary,
    /// One entry per marker, in session order.
    pub visuals: Vec<MarkerVisual>,
}

/// Display collaborator fed by the driver.
///
/// Every method defaults to a no-op, so a host implements only the targets it
/// actually has. Errors are logged by the driver and never abort a refresh.
pub trait FrameSink {
    fn present_summary(&mut self, _summary: &FrameSummary) -> Result<(), SinkError> {
        Ok(())
    }

    fn present_marker(&mut self, _id: EntityId, _visual: &MarkerVisual) -> Result<(), SinkError> {
        Ok(())
    }

    /// Keeps a range control in step with programmatic cursor moves.
    fn sync_cursor(&mut self, _cursor_day: f64) -> Result<(), SinkError> {
        Ok(())
    }

    fn set_play_indicator(&mut self, _playing: bool) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink with no display targets at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {}

/// User input, applied between frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlaybackIntent {
    TogglePlay,
    Scrub(f64),
    SetSpeed(f64),
}

/// Per-frame orchestration: advance playback, sample the timeline, map every
/// marker, push the results to the sink.
///
/// All mutation goes through `&mut self`, so an intent and a frame tick can
/// never interleave. Every intent refreshes immediately, even while stopped.
pub struct FrameDriver<S> {
    session: Session,
    playback: PlaybackController,
    mapper: IntensityMapper,
    viewport: Viewport,
    sink: S,
    events: EventBus<PlaybackEvent>,
    frame_index: u64,
    wall_clock: Time,
}

impl<S: FrameSink> FrameDriver<S> {
    pub fn new(session: Session, cfg: &EngineConfig, sink: S) -> Self {
        let playback = PlaybackController::new(session.timeline().day_range(), &cfg.playback);
        Self {
            session,
            playback,
            mapper: IntensityMapper::new(cfg.intensity.clone()),
            viewport: Viewport::default(),
            sink,
            events: EventBus::new(),
            frame_index: 0,
            wall_clock: Time::default(),
        }
    }

    /// Runs one host frame: tick playback, then refresh.
    pub fn frame(&mut self, frame: Frame) -> FrameSnapshot {
        self.frame_index = frame.index;
        self.wall_clock = frame.time;
        if let Some(event) = self.playback.on_frame_tick() {
            self.record(event);
        }
        self.refresh()
    }

    pub fn apply(&mut self, intent: PlaybackIntent) -> FrameSnapshot {
        let event = match intent {
            PlaybackIntent::TogglePlay => Some(self.playback.toggle_play()),
            PlaybackIntent::Scrub(day) => Some(self.playback.on_scrub(day)),
            PlaybackIntent::SetSpeed(multiplier) => self.playback.set_speed(multiplier),
        };
        if let Some(event) = event {
            self.record(event);
        }
        self.refresh()
    }

    pub fn toggle_play(&mut self) -> FrameSnapshot {
        self.apply(PlaybackIntent::TogglePlay)
    }

    pub fn scrub(&mut self, day: f64) -> FrameSnapshot {
        self.apply(PlaybackIntent::Scrub(day))
    }

    pub fn set_speed(&mut self, multiplier: f64) -> FrameSnapshot {
        self.apply(PlaybackIntent::SetSpeed(multiplier))
    }

    /// Updates projection parameters only.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        debug!(width, height, aspect = self.viewport.aspect(), "viewport resized");
    }

    /// Recomputes and publishes the current state without touching playback.
    pub fn refresh(&mut self) -> FrameSnapshot {
        let cursor = self.playback.cursor_day();
        let sample = self.session.timeline().sample(cursor);

        let visuals: Vec<MarkerVisual> = self
            .session
            .markers()
            .iter()
            .map(|m| {
                self.mapper
                    .map(&m.onset, m.phase_offset(), cursor, self.wall_clock)
            })
            .collect();

        let summary = FrameSummary {
            date_label: sample.date.to_string(),
            cases: sample.cases,
            deaths: sample.deaths,
            day_floor: self.playback.day_floor(),
            active_entities: visuals.iter().filter(|v| v.visible).count(),
        };

        report(self.sink.present_summary(&summary), "summary");
        for (marker, visual) in self.session.markers().iter().zip(&visuals) {
            report(self.sink.present_marker(marker.entity.id, visual), "marker");
        }
        report(self.sink.sync_cursor(cursor), "cursor");

        FrameSnapshot {
            frame_index: self.frame_index,
            cursor_day: cursor,
            playing: self.playback.is_playing(),
            summary,
            visuals,
        }
    }

    fn record(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::AutoStopped { day } => info!(day, "playback reached end of data"),
            _ => debug!(?event, frame = self.frame_index, "playback transition"),
        }
        if event.changes_play_state() {
            let playing = self.playback.is_playing();
            report(self.sink.set_play_indicator(playing), "play indicator");
        }
        self.events.emit(self.frame_index, event);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Transitions recorded since the last drain, oldest first.
    pub fn events(&self) -> &EventBus<PlaybackEvent> {
        &self.events
    }

    /// Hands over the recorded transitions and empties the log.
    pub fn drain_events(&mut self) -> Vec<Stamped<PlaybackEvent>> {
        self.events.drain()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn report(result: Result<(), SinkError>, what: &'static str) {
    if let Err(e) = result {
        warn!(sink = what, error = %e, "display update skipped");
    }
}

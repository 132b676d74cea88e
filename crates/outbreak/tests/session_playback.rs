use outbreak::dataset::{SyntheticTimeline, builtin_cities};
use outbreak::{
    EngineConfig, FrameDriver, FrameSink, FrameSummary, PlaybackEvent, PlaybackIntent, Role,
    Session, SinkError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::FrameClock;

#[derive(Default)]
struct Panel {
    summaries: Vec<FrameSummary>,
    slider: Vec<f64>,
}

impl FrameSink for Panel {
    fn present_summary(&mut self, summary: &FrameSummary) -> Result<(), SinkError> {
        self.summaries.push(summary.clone());
        Ok(())
    }

    fn sync_cursor(&mut self, cursor_day: f64) -> Result<(), SinkError> {
        self.slider.push(cursor_day);
        Ok(())
    }
}

fn build_driver(days: usize, seed: u64) -> FrameDriver<Panel> {
    let cfg = EngineConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let timeline = SyntheticTimeline {
        days,
        ..SyntheticTimeline::default()
    }
    .generate(&mut rng);
    let session = Session::build(&builtin_cities(), timeline, &cfg.onset, &mut rng).unwrap();
    FrameDriver::new(session, &cfg, Panel::default())
}

#[test]
fn full_playback_reaches_last_record_and_stops() {
    let mut driver = build_driver(120, 42);
    let mut clock = FrameClock::new(1.0 / 60.0);

    driver.apply(PlaybackIntent::SetSpeed(4.0));
    driver.apply(PlaybackIntent::TogglePlay);

    let hubs: Vec<usize> = driver
        .session()
        .markers()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.entity.role == Role::Hub)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(hubs.len(), 4);

    let mut frames = 0;
    while driver.playback().is_playing() {
        let snap = driver.frame(clock.tick());
        for &i in &hubs {
            if snap.visuals[i].visible {
                assert!(snap.cursor_day > 10.0, "hub visible at {}", snap.cursor_day);
            }
        }
        frames += 1;
        assert!(frames < 10_000, "playback never stopped");
    }

    // 119 days at 0.4 days per frame.
    assert_eq!(frames, 298);
    assert_eq!(driver.playback().cursor_day(), 119.0);

    let last = driver.sink().summaries.last().unwrap().clone();
    let last_record = driver.session().timeline().records().last().unwrap().clone();
    assert_eq!(last.cases, last_record.cases);
    assert_eq!(last.deaths, last_record.deaths);
    assert_eq!(last.date_label, last_record.date);
    assert_eq!(last.day_floor, 119);

    let summaries = &driver.sink().summaries;
    for pair in summaries.windows(2) {
        assert!(pair[1].cases >= pair[0].cases);
        assert!(pair[1].active_entities >= pair[0].active_entities);
    }
    for pair in driver.sink().slider.windows(2) {
        assert!(pair[1] >= pair[0]);
    }

    let events: Vec<PlaybackEvent> = driver.events().events().iter().map(|e| e.event).collect();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::SpeedChanged { multiplier: 4.0 },
            PlaybackEvent::Played,
            PlaybackEvent::AutoStopped { day: 119.0 },
        ]
    );
}

#[test]
fn scrubbing_back_rewinds_totals_and_markers() {
    let mut driver = build_driver(400, 7);
    let late = driver.scrub(399.0);
    assert_eq!(late.summary.active_entities, 10);

    let early = driver.scrub(0.0);
    assert_eq!(early.summary.active_entities, 0);
    assert_eq!(early.summary.date_label, "2020-01-01");
    assert!(early.visuals.iter().all(|v| !v.visible));

    let mid = driver.scrub(0.5);
    assert_eq!(mid.summary.active_entities, 1);
    assert!(mid.visuals[0].visible);
}

#[test]
fn same_seed_same_session() {
    let a = build_driver(30, 1);
    let b = build_driver(30, 1);
    assert_eq!(a.session(), b.session());
}

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::haversine_km;
use outbreak::dataset::{self, CityRecord, SyntheticTimeline};
use outbreak::{
    EngineConfig, FrameDriver, FrameSink, FrameSnapshot, FrameSummary, Role, Session, SinkError,
    SpeedPreset, Timeline,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::FrameClock;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the outbreak globe")]
struct Args {
    /// Engine tuning as JSON; missing fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// City list as JSON (default: built-in ten cities)
    #[arg(long, global = true)]
    cities: Option<PathBuf>,

    /// Daily totals as JSON (default: synthetic series)
    #[arg(long, global = true)]
    timeline: Option<PathBuf>,

    /// Seed for onset jitter and the synthetic series
    #[arg(long, global = true, default_value_t = 2020)]
    seed: u64,

    /// Length of the synthetic series in days
    #[arg(long, global = true, default_value_t = 2195)]
    days: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the session at a fixed frame rate and print snapshots
    Simulate {
        /// Upper bound on frames to run
        #[arg(long, default_value_t = 100_000)]
        frames: u64,

        /// Host frame rate driving the pulse clock
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Speed multiplier (presets: 0.5, 1, 2, 4)
        #[arg(long)]
        speed: Option<f64>,

        /// Scrub to this day before playing
        #[arg(long)]
        start_day: Option<f64>,

        /// Print every Nth frame
        #[arg(long, default_value_t = 60)]
        every: u64,

        /// Emit one JSON summary per printed frame
        #[arg(long)]
        json: bool,
    },

    /// Print the frozen onset schedule
    Onsets,

    /// Write a synthetic timeline as JSON
    Timeline {
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => EngineConfig::from_path(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    let mut rng = StdRng::seed_from_u64(args.seed);

    let timeline = match &args.timeline {
        Some(path) => dataset::read_timeline(path).map_err(|e| e.to_string())?,
        None => SyntheticTimeline {
            days: args.days,
            ..SyntheticTimeline::default()
        }
        .generate(&mut rng),
    };

    match args.command {
        Command::Timeline { out } => cmd_timeline(&timeline, out),
        Command::Onsets => {
            let cities = load_cities(&args.cities)?;
            let session = Session::build(&cities, timeline, &cfg.onset, &mut rng)
                .map_err(|e| e.to_string())?;
            cmd_onsets(&session);
            Ok(())
        }
        Command::Simulate {
            frames,
            fps,
            speed,
            start_day,
            every,
            json,
        } => {
            let cities = load_cities(&args.cities)?;
            let session = Session::build(&cities, timeline, &cfg.onset, &mut rng)
                .map_err(|e| e.to_string())?;
            let opts = SimulateOpts {
                frames,
                fps,
                speed,
                start_day,
                every: every.max(1),
                json,
            };
            cmd_simulate(session, &cfg, &opts)
        }
    }
}

fn load_cities(path: &Option<PathBuf>) -> Result<Vec<CityRecord>, String> {
    match path {
        Some(p) => dataset::read_cities(p).map_err(|e| e.to_string()),
        None => Ok(dataset::builtin_cities()),
    }
}

fn cmd_timeline(timeline: &Timeline, out: Option<PathBuf>) -> Result<(), String> {
    let payload = dataset::timeline_to_json(timeline).map_err(|e| e.to_string())?;
    match out {
        Some(path) => {
            fs::write(&path, payload).map_err(|e| format!("write {path:?}: {e}"))?;
            eprintln!("wrote {} ({} days)", path.display(), timeline.len());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

fn cmd_onsets(session: &Session) {
    let origin = session
        .markers()
        .iter()
        .find(|m| m.entity.role == Role::Origin)
        .map(|m| m.entity.coord);

    println!(
        "{:<14} {:<7} {:>9} {:>7} {:>9}",
        "city", "role", "km", "jitter", "onset"
    );
    for m in session.markers() {
        let km = origin.map_or(0.0, |o| haversine_km(o, m.entity.coord));
        println!(
            "{:<14} {:<7} {:>9} {:>7} {:>9.1}",
            m.entity.name,
            role_label(m.entity.role),
            group_thousands(km),
            m.onset.jitter_days,
            m.onset.onset_day
        );
    }
}

struct SimulateOpts {
    frames: u64,
    fps: f64,
    speed: Option<f64>,
    start_day: Option<f64>,
    every: u64,
    json: bool,
}

fn cmd_simulate(session: Session, cfg: &EngineConfig, opts: &SimulateOpts) -> Result<(), String> {
    if !(opts.fps.is_finite() && opts.fps > 0.0) {
        return Err(format!("--fps must be positive, got {}", opts.fps));
    }

    let total = session.markers().len();
    let mut driver = FrameDriver::new(session, cfg, ConsoleSink::default());
    let mut clock = FrameClock::new(1.0 / opts.fps);

    if let Some(speed) = opts.speed {
        match SpeedPreset::ALL.iter().find(|p| p.multiplier() == speed) {
            Some(preset) => info!(preset = preset.label(), "speed preset"),
            None => info!(speed, "using non-preset speed"),
        }
        driver.set_speed(speed);
    }
    if let Some(day) = opts.start_day {
        driver.scrub(day);
    }
    driver.toggle_play();
    info!(dt_s = clock.dt_s(), "playing");

    let mut transitions = 0usize;
    for _ in 0..opts.frames {
        let snap = driver.frame(clock.tick());
        for stamped in driver.drain_events() {
            debug!(frame = stamped.frame_index, event = ?stamped.event, "transition");
            transitions += 1;
        }
        if snap.frame_index % opts.every == 0 || !snap.playing {
            print_snapshot(&snap, total, opts.json)?;
        }
        if !snap.playing {
            break;
        }
    }

    let sink = driver.into_sink();
    info!(
        summaries = sink.summaries,
        indicator_flips = sink.indicator_flips,
        transitions,
        "simulation finished"
    );
    Ok(())
}

fn print_snapshot(snap: &FrameSnapshot, total: usize, json: bool) -> Result<(), String> {
    if json {
        let line = serde_json::to_string(&snap.summary).map_err(|e| format!("json: {e}"))?;
        println!("{line}");
        return Ok(());
    }
    let s = &snap.summary;
    println!(
        "{:>6}  {}  {:<10} day {:>5}  cases {:>13}  deaths {:>11}  active {}/{}",
        snap.frame_index,
        play_indicator(snap.playing),
        s.date_label,
        s.day_floor,
        group_thousands(s.cases),
        group_thousands(s.deaths),
        s.active_entities,
        total
    );
    Ok(())
}

/// Counts what the driver pushes; the table itself comes from snapshots.
#[derive(Debug, Default)]
struct ConsoleSink {
    summaries: u64,
    indicator_flips: u64,
}

impl FrameSink for ConsoleSink {
    fn present_summary(&mut self, _summary: &FrameSummary) -> Result<(), SinkError> {
        self.summaries += 1;
        Ok(())
    }

    fn set_play_indicator(&mut self, playing: bool) -> Result<(), SinkError> {
        self.indicator_flips += 1;
        eprintln!("[{}]", play_indicator(playing));
        Ok(())
    }
}

fn play_indicator(playing: bool) -> &'static str {
    if playing { "playing" } else { "paused " }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Origin => "origin",
        Role::Hub => "hub",
        Role::Normal => "city",
    }
}

/// Truncates to a whole number and groups digits by thousands.
fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let n = value.trunc().abs() as u64;
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 && n > 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

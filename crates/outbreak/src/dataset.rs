//! Static inputs: the monitored cities and the daily totals.
//!
//! Both load from JSON. The city loader accepts the spellings older exports use
//! (`lat`, `lng`/`lon`, `hub`) next to the canonical camelCase names.

use std::path::Path;

use chrono::{Days, NaiveDate};
use foundation::math::GeoCoord;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::Role;
use crate::error::LoadError;
use crate::timeline::{Timeline, TimelineRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub name: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub is_origin: bool,
    #[serde(default, alias = "hub")]
    pub is_hub: bool,
}

impl CityRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            is_origin: false,
            is_hub: false,
        }
    }

    pub fn origin(mut self) -> Self {
        self.is_origin = true;
        self
    }

    pub fn hub(mut self) -> Self {
        self.is_hub = true;
        self
    }

    pub fn coord(&self) -> GeoCoord {
        GeoCoord::new(self.latitude, self.longitude)
    }

    pub fn role(&self) -> Role {
        Role::from_flags(self.is_origin, self.is_hub)
    }
}

pub fn parse_cities(json: &str) -> Result<Vec<CityRecord>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses `[{ "date", "cases", "deaths" }, ...]` in day order.
pub fn parse_timeline(json: &str) -> Result<Timeline, LoadError> {
    let records: Vec<TimelineRecord> = serde_json::from_str(json)?;
    Timeline::validated(records)
}

pub fn read_cities(path: &Path) -> Result<Vec<CityRecord>, LoadError> {
    parse_cities(&read_to_string(path)?)
}

pub fn read_timeline(path: &Path) -> Result<Timeline, LoadError> {
    parse_timeline(&read_to_string(path)?)
}

pub fn timeline_to_json(timeline: &Timeline) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(timeline.records())?)
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// The ten monitored cities of the stock visualization, Wuhan first.
pub fn builtin_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new("Wuhan", 30.5928, 114.3055).origin(),
        CityRecord::new("Seoul", 37.5665, 126.9780),
        CityRecord::new("New York", 40.7128, -74.0060).hub(),
        CityRecord::new("London", 51.5074, -0.1278).hub(),
        CityRecord::new("Tokyo", 35.6762, 139.6503).hub(),
        CityRecord::new("Paris", 48.8566, 2.3522).hub(),
        CityRecord::new("Sao Paulo", -23.5505, -46.6333),
        CityRecord::new("Mumbai", 19.0760, 72.8777),
        CityRecord::new("Sydney", -33.8688, 151.2093),
        CityRecord::new("Moscow", 55.7558, 37.6173),
    ]
}

/// Generator for a plausible-looking cumulative series.
///
/// Daily new cases are exponentially distributed with a mean that steps up in
/// phases; deaths accrue as a fixed share of each day's cases. Totals are
/// truncated to whole numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticTimeline {
    pub days: usize,
    pub start: NaiveDate,
    pub death_rate: f64,
}

impl Default for SyntheticTimeline {
    fn default() -> Self {
        Self {
            days: 2195,
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            death_rate: 0.009,
        }
    }
}

impl SyntheticTimeline {
    /// Mean daily new cases for `day`.
    pub fn daily_case_mean(day: usize) -> f64 {
        match day {
            0..60 => 500.0,
            60..365 => 50_000.0,
            365..730 => 100_000.0,
            _ => 200_000.0,
        }
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Timeline {
        let mut cases = 0.0;
        let mut deaths = 0.0;
        let records = (0..self.days)
            .map(|day| {
                let u: f64 = rng.random();
                let daily = -Self::daily_case_mean(day) * (1.0 - u).ln();
                cases += daily;
                deaths += daily * self.death_rate;
                TimelineRecord::new(self.label(day), cases.trunc(), deaths.trunc())
            })
            .collect();
        Timeline::new(records)
    }

    fn label(&self, day: usize) -> String {
        self.start
            .checked_add_days(Days::new(day as u64))
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("day {day}"))
    }
}

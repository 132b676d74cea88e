use foundation::time::DayRange;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// One day of cumulative totals. The date is an opaque label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRecord {
    pub date: String,
    pub cases: f64,
    pub deaths: f64,
}

impl TimelineRecord {
    pub fn new(date: impl Into<String>, cases: f64, deaths: f64) -> Self {
        Self {
            date: date.into(),
            cases,
            deaths,
        }
    }
}

/// Interpolated totals for a fractional day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineSample<'a> {
    /// Label of the day the sample falls in; empty for the zero sample.
    pub date: &'a str,
    pub cases: f64,
    pub deaths: f64,
}

impl TimelineSample<'static> {
    pub const ZERO: Self = TimelineSample {
        date: "",
        cases: 0.0,
        deaths: 0.0,
    };
}

/// Daily records indexed by day number. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    records: Vec<TimelineRecord>,
}

impl Timeline {
    pub fn new(records: Vec<TimelineRecord>) -> Self {
        Self { records }
    }

    /// Builds a timeline, rejecting negative or non-finite totals.
    pub fn validated(records: Vec<TimelineRecord>) -> Result<Self, LoadError> {
        for (day, r) in records.iter().enumerate() {
            for (what, value) in [("cases", r.cases), ("deaths", r.deaths)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(LoadError::InvalidRecord {
                        day,
                        reason: format!("{what} = {value}"),
                    });
                }
            }
        }
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[TimelineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the last record as a day value; 0 for an empty timeline.
    pub fn last_day(&self) -> f64 {
        self.records.len().saturating_sub(1) as f64
    }

    /// Days a playback cursor may occupy.
    pub fn day_range(&self) -> DayRange {
        DayRange::up_to(self.last_day())
    }

    /// Linearly interpolated totals at fractional day `day`.
    ///
    /// The date label comes from the day's own record. Days outside the recorded
    /// range (including negative and NaN) yield [`TimelineSample::ZERO`]; callers that
    /// want end-of-data values clamp first.
    pub fn sample(&self, day: f64) -> TimelineSample<'_> {
        if day.is_nan() || day < 0.0 {
            return TimelineSample::ZERO;
        }
        let floor = day.floor();
        let index = floor as usize;
        let Some(current) = self.records.get(index) else {
            return TimelineSample::ZERO;
        };
        let next_index = (index + 1).min(self.records.len() - 1);
        let next = &self.records[next_index];
        let t = day - floor;

        TimelineSample {
            date: &current.date,
            cases: lerp(current.cases, next.cases, t),
            deaths: lerp(current.deaths, next.deaths, t),
        }
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

/// Wall-clock time in seconds.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub fn seconds(self) -> f64 {
        self.0
    }
}

/// Closed range of simulated days, `[start, end]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DayRange {
    pub start: f64,
    pub end: f64,
}

impl DayRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Range covering day 0 through `last_day`.
    pub fn up_to(last_day: f64) -> Self {
        Self::new(0.0, last_day)
    }

    pub fn contains(&self, day: f64) -> bool {
        day >= self.start && day <= self.end
    }

    /// Clamps `day` into the range. NaN maps to `start`.
    pub fn clamp(&self, day: f64) -> f64 {
        if day.is_nan() {
            return self.start;
        }
        day.clamp(self.start, self.end)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::{DayRange, Time};

    #[test]
    fn clamp_pins_to_bounds() {
        let r = DayRange::up_to(10.0);
        assert_eq!(r.clamp(-3.0), 0.0);
        assert_eq!(r.clamp(4.5), 4.5);
        assert_eq!(r.clamp(11.0), 10.0);
        assert_eq!(r.clamp(f64::NAN), 0.0);
        assert_eq!(r.clamp(f64::INFINITY), 10.0);
    }

    #[test]
    fn inverted_range_collapses_to_start() {
        let r = DayRange::new(5.0, 2.0);
        assert_eq!(r.end, 5.0);
        assert_eq!(r.duration(), 0.0);
        assert!(r.contains(5.0));
    }

    #[test]
    fn time_orders_by_seconds() {
        assert!(Time(1.0) < Time(2.5));
        assert_eq!(Time(3.0).seconds(), 3.0);
    }
}

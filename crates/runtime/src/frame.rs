use foundation::time::Time;

/// Frame metadata handed to every per-frame callback.
///
/// `time` is the wall clock at the start of the frame. It drives cosmetic effects
/// only; simulation progress is owned by whoever consumes the frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Wall-clock time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }
}

/// Fixed-step frame source for headless and replayed sessions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameClock {
    dt_s: f64,
    next_index: u64,
    origin: Time,
}

impl FrameClock {
    pub fn new(dt_s: f64) -> Self {
        Self::starting_at(Time(0.0), dt_s)
    }

    pub fn starting_at(origin: Time, dt_s: f64) -> Self {
        Self {
            dt_s,
            next_index: 0,
            origin,
        }
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    /// Returns the next frame. Time is derived from the index, so it never drifts.
    pub fn tick(&mut self) -> Frame {
        let index = self.next_index;
        self.next_index += 1;
        Frame::new(index, Time(self.origin.0 + index as f64 * self.dt_s))
    }
}

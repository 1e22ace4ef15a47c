//! Fixed-interval game clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. [`GameClock`] turns
//! that into two independent fixed-interval schedules: production ticks and
//! autosave beats. Game logic only ever sees whole intervals, which keeps it
//! deterministic and fully testable.

/// Largest wall-clock gap (ms) credited in a single update. A backgrounded
/// tab resumes without replaying minutes of production at once.
pub const MAX_FRAME_DELTA_MS: f64 = 5_000.0;

/// One fixed-interval schedule.
#[derive(Clone, Debug)]
pub struct Interval {
    period_ms: f64,
    /// Accumulated milliseconds not yet consumed as whole periods
    accumulator: f64,
}

impl Interval {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: f64::from(period_ms.max(1)),
            accumulator: 0.0,
        }
    }

    /// Feed `delta_ms` of elapsed time; returns how many periods completed.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        self.accumulator += delta_ms;
        let periods = (self.accumulator / self.period_ms) as u32;
        self.accumulator -= f64::from(periods) * self.period_ms;
        periods
    }
}

/// What happened during one clock update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Elapsed {
    /// Production ticks to apply.
    pub ticks: u32,
    /// Whether at least one autosave interval passed.
    pub save_due: bool,
}

pub struct GameClock {
    production: Interval,
    autosave: Interval,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameClock {
    pub fn new(production_interval_ms: u32, autosave_interval_ms: u32) -> Self {
        Self {
            production: Interval::new(production_interval_ms),
            autosave: Interval::new(autosave_interval_ms),
            last_timestamp: None,
        }
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    ///
    /// Call this once per draw frame.
    pub fn update(&mut self, now_ms: f64) -> Elapsed {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0, // First frame: no delta
        };
        self.last_timestamp = Some(now_ms);

        Elapsed {
            ticks: self.production.advance(delta),
            save_due: self.autosave.advance(delta) > 0,
        }
    }
}

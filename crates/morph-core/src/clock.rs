/// Per-frame clock: clamps frame deltas and tracks elapsed wall time.
///
/// The clamped delta drives integration so a stalled tab cannot explode the
/// simulation; elapsed time accumulates the raw deltas and only feeds the
/// animated noise fields. The accumulator is `f64` so hours-long sessions
/// keep sub-millisecond resolution.
#[derive(Clone, Debug)]
pub struct FrameClock {
    min_dt: f32,
    max_dt: f32,
    elapsed: f64,
}

impl FrameClock {
    pub fn new(min_dt: f32, max_dt: f32) -> Self {
        Self {
            min_dt,
            max_dt,
            elapsed: 0.0,
        }
    }

    /// Advance by `raw_dt` seconds and return the clamped integration step.
    pub fn tick(&mut self, raw_dt: f32) -> f32 {
        let raw_dt = if raw_dt.is_finite() { raw_dt.max(0.0) } else { 0.0 };
        self.elapsed += f64::from(raw_dt);
        raw_dt.clamp(self.min_dt, self.max_dt)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

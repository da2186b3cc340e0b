use std::time::Duration;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Host timestamp of this tick, in milliseconds.
    pub timestamp_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Turns host frame timestamps (milliseconds, e.g. a display-refresh
/// callback's argument) into clamped per-frame deltas.
///
/// The first tick has no predecessor and reports `first_frame_dt`. A timestamp
/// earlier than the previous one reports `dt_min`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    first_frame_dt: Duration,
}

impl FrameClock {
    /// Creates a clock with default clamps (100 µs, 250 ms) and a 1/60 s first
    /// frame.
    pub fn new() -> Self {
        Self::with_clamps(
            Duration::from_micros(100),
            Duration::from_millis(250),
            Duration::from_secs_f64(1.0 / 60.0),
        )
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration, first_frame_dt: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last_ms: None,
            frame_index: 0,
            dt_min,
            dt_max,
            first_frame_dt,
        }
    }

    /// Forgets the previous timestamp; the next tick counts as a first frame.
    ///
    /// Useful when rendering resumes after being suspended.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let dt = match self.last_ms {
            None => self.first_frame_dt,
            Some(last) => {
                let elapsed_ms = timestamp_ms - last;
                if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
                    Duration::from_secs_f64(elapsed_ms / 1000.0).clamp(self.dt_min, self.dt_max)
                } else {
                    self.dt_min
                }
            }
        };

        self.last_ms = Some(timestamp_ms);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            timestamp_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

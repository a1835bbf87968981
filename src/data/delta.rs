use std::time::{Duration, Instant};

/// Longest step the simulation clock advances in one frame. Longer
/// gaps (a dragged or minimized window) are treated as this long.
pub const MAX_DELTA: Duration = Duration::from_secs(1);

pub struct Delta {
    last_call: Instant,
}

impl Delta {
    pub fn new() -> Self {
        Self {
            last_call: Instant::now(),
        }
    }

    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_call);
        self.last_call = now;
        elapsed.min(MAX_DELTA)
    }
}

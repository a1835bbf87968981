use std::time::Duration;

use rand::Rng;

use super::Scene;

pub const ROCKET_INTERVAL: Duration = Duration::from_millis(500);
pub const FIREWORK_INTERVAL: Duration = Duration::from_millis(500);
pub const BALLOON_INTERVAL: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Rocket,
    Firework,
    Balloon,
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    kind: Kind,
    period: Duration,
    next: Duration,
}

impl Interval {
    fn new(kind: Kind, period: Duration) -> Self {
        Self {
            kind,
            period,
            next: period,
        }
    }

    // Fires at most once per call. A caller that stalled for several
    // periods gets one spawn, not a burst.
    fn poll(&mut self, elapsed: Duration) -> bool {
        if self.period.is_zero() || elapsed < self.next {
            return false;
        }

        self.next += self.period;

        if self.next <= elapsed {
            self.next = elapsed + self.period;
        }

        true
    }
}

/// Periodic source of new entities, one fixed-period trigger per kind.
/// Time is whatever the caller says it is: `poll` takes the elapsed
/// time since the animation started.
#[derive(Debug, Clone)]
pub struct Spawner {
    intervals: [Interval; 3],
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(ROCKET_INTERVAL, FIREWORK_INTERVAL, BALLOON_INTERVAL)
    }
}

impl Spawner {
    /// A zero period disables that kind of spawn.
    pub fn new(rocket: Duration, firework: Duration, balloon: Duration) -> Self {
        Self {
            intervals: [
                Interval::new(Kind::Rocket, rocket),
                Interval::new(Kind::Firework, firework),
                Interval::new(Kind::Balloon, balloon),
            ],
        }
    }

    /// Restart all timers as if the animation began at `elapsed`.
    pub fn reset(&mut self, elapsed: Duration) {
        for interval in self.intervals.iter_mut() {
            interval.next = elapsed + interval.period;
        }
    }

    pub fn poll<R: Rng + ?Sized>(&mut self, elapsed: Duration, scene: &mut Scene, rng: &mut R) {
        for interval in self.intervals.iter_mut() {
            if !interval.poll(elapsed) {
                continue;
            }

            log::debug!("spawning {:?} at {:?}", interval.kind, elapsed);

            match interval.kind {
                Kind::Rocket => scene.spawn_rocket(rng),
                Kind::Firework => scene.spawn_firework(rng),
                Kind::Balloon => scene.spawn_balloon(rng),
            }
        }
    }
}

use serde::{Deserialize, Serialize};

/// A point on the session clock, in milliseconds since session start.
///
/// Snapshots are stamped with the authority holder's session clock at
/// capture time. Replicas only ever compare stamps against each other
/// (last-writer-wins), never against their own clock, so modest clock
/// offset between participants is harmless here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionInstant {
    millis: u64,
}

impl SessionInstant {
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn is_more_recent_than(&self, other: &SessionInstant) -> bool {
        self.millis > other.millis
    }
}

/// Tick-driven countdown used for deferred continuations: arm it with a
/// duration, feed it `dt` every fixed step, act when it rings. There is no
/// background scheduling; an abandoned countdown simply never rings.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    remaining: f32,
    armed: bool,
}

impl Countdown {
    pub fn idle() -> Self {
        Self {
            remaining: 0.0,
            armed: false,
        }
    }

    pub fn start(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            armed: true,
        }
    }

    /// Advances the countdown by `dt` seconds. Returns true on the tick the
    /// countdown expires; afterwards it is disarmed and returns false.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.armed = false;
            return true;
        }
        false
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

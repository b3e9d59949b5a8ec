use crate::instant::Instant;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Ticks since `0001-01-01T00:00:00` UTC. Values outside the instant range
    /// are clamped by the caller.
    fn utc_now_ticks(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn utc_now_ticks(&self) -> i64 {
        (**self).utc_now_ticks()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn utc_now_ticks(&self) -> i64 {
        (**self).utc_now_ticks()
    }
}

/// A clock stopped at one instant.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock {
    ticks: i64,
}

impl FixedClock {
    /// Stops the clock at the reading of `now`; its kind is ignored.
    pub const fn new(now: Instant) -> FixedClock {
        FixedClock { ticks: now.ticks() }
    }

    pub const fn from_ticks(ticks: i64) -> FixedClock {
        FixedClock { ticks }
    }
}

impl Clock for FixedClock {
    fn utc_now_ticks(&self) -> i64 {
        self.ticks
    }
}

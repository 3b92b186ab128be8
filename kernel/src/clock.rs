use time::{Date, OffsetDateTime};

/// Source of "now" and "today" for every overdue and fine computation.
pub trait Clock: 'static + Sync + Send {
    fn now(&self) -> OffsetDateTime;

    /// Calendar day of [`Clock::now`] in the clock's own offset.
    fn today(&self) -> Date {
        self.now().date()
    }
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}

/// Always answers the same instant. Useful for replaying reports as of a past date.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FixedClock(OffsetDateTime);

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

use time::{OffsetDateTime, UtcOffset};

use kernel::interface::clock::Clock;

/// Wall clock expressed in the business's UTC offset, so "today" flips at local midnight.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

#[cfg(test)]
mod test {
    use time::macros::offset;

    use kernel::interface::clock::Clock;

    use super::SystemClock;

    #[test]
    fn now_carries_configured_offset() {
        let clock = SystemClock::new(offset!(-3));
        assert_eq!(clock.now().offset(), offset!(-3));
    }
}

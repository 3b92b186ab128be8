use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln, References};

use crate::entity::ExpectedReturnDate;

/// Whole days past the expected return date. Never negative.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct DaysLate(i64);

impl DaysLate {
    pub fn new(days: impl Into<i64>) -> Self {
        Self(days.into().max(0))
    }

    /// Comparing calendar days makes the ceiling of the elapsed time exact, so a
    /// return on the expected day itself is never late.
    pub fn between(expected: &Date, compared_on: &Date) -> Self {
        if compared_on > expected {
            Self((*compared_on - *expected).whole_days())
        } else {
            Self(0)
        }
    }

    pub fn is_late(&self) -> bool {
        self.0 > 0
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct FineAmount(Decimal);

impl FineAmount {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }
}

/// Currency units charged per late day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct FineRate(Decimal);

impl FineRate {
    pub const DEFAULT_PER_DAY: i64 = 20;

    pub fn new(rate: impl Into<Decimal>) -> Self {
        Self(rate.into())
    }
}

impl Default for FineRate {
    fn default() -> Self {
        Self(Decimal::from(Self::DEFAULT_PER_DAY))
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, References)]
pub struct FineAssessment {
    days_late: DaysLate,
    amount: FineAmount,
}

impl FineAssessment {
    pub fn new(days_late: DaysLate, amount: FineAmount) -> Self {
        Self { days_late, amount }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct FinePolicy {
    rate: FineRate,
}

impl FinePolicy {
    pub fn new(rate: FineRate) -> Self {
        Self { rate }
    }

    /// Lateness and penalty of a rental due on `expected` when compared against
    /// `compared_on`, which is today for display or the actual return day at settlement.
    /// Uncapped.
    pub fn assess(&self, expected: &ExpectedReturnDate, compared_on: &Date) -> FineAssessment {
        let days_late = DaysLate::between(expected.as_ref(), compared_on);
        let amount = FineAmount::new(Decimal::from(*days_late.as_ref()) * *self.rate.as_ref());
        FineAssessment::new(days_late, amount)
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::date;
    use time::Duration;

    use super::{DaysLate, FineAmount, FinePolicy, FineRate};
    use crate::entity::ExpectedReturnDate;

    #[test]
    fn on_time_return_is_free() {
        let policy = FinePolicy::default();
        let assessment = policy.assess(
            &ExpectedReturnDate::new(date!(2024 - 01 - 10)),
            &date!(2024 - 01 - 10),
        );
        assert_eq!(assessment.days_late(), &DaysLate::new(0));
        assert_eq!(assessment.amount(), &FineAmount::zero());
    }

    #[test]
    fn three_days_late_costs_sixty() {
        let policy = FinePolicy::default();
        let assessment = policy.assess(
            &ExpectedReturnDate::new(date!(2024 - 01 - 10)),
            &date!(2024 - 01 - 13),
        );
        assert_eq!(assessment.days_late(), &DaysLate::new(3));
        assert_eq!(assessment.amount(), &FineAmount::new(dec!(60)));
    }

    #[test]
    fn early_return_is_never_negative() {
        let policy = FinePolicy::default();
        let expected = date!(2024 - 01 - 10);
        for early in 1..40 {
            let assessment = policy.assess(
                &ExpectedReturnDate::new(expected),
                &(expected - Duration::days(early)),
            );
            assert!(!assessment.days_late().is_late());
            assert_eq!(assessment.amount(), &FineAmount::zero());
        }
    }

    #[test]
    fn fine_grows_linearly_with_late_days() {
        let policy = FinePolicy::default();
        let expected = date!(2024 - 02 - 25);
        for late in 1..=60 {
            let assessment = policy.assess(
                &ExpectedReturnDate::new(expected),
                &(expected + Duration::days(late)),
            );
            assert_eq!(assessment.days_late(), &DaysLate::new(late));
            assert_eq!(
                assessment.amount(),
                &FineAmount::new(Decimal::from(late) * dec!(20))
            );
        }
    }

    #[test]
    fn custom_rate_is_applied() {
        let policy = FinePolicy::new(FineRate::new(dec!(7.50)));
        let assessment = policy.assess(
            &ExpectedReturnDate::new(date!(2023 - 12 - 30)),
            &date!(2024 - 01 - 02),
        );
        assert_eq!(assessment.days_late(), &DaysLate::new(3));
        assert_eq!(assessment.amount(), &FineAmount::new(dec!(22.50)));
    }

    #[test]
    fn days_late_never_goes_below_zero() {
        assert_eq!(DaysLate::new(-4), DaysLate::new(0));
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;
use vodca::References;

use crate::entity::{CustomerId, Rental, RentalId, RentalStatus};
use crate::{KernelError, Violations};

/// Longest window a single calendar request may cover.
pub const MAX_CALENDAR_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct CalendarRange {
    from: Date,
    to: Date,
}

impl CalendarRange {
    pub fn new(from: Date, to: Date) -> error_stack::Result<Self, KernelError> {
        let mut violations = Violations::new();
        violations.check(to >= from, "to", "range end must not be before its start");
        violations.check(
            (to - from).whole_days() < MAX_CALENDAR_DAYS,
            "to",
            format!("range may span at most {MAX_CALENDAR_DAYS} days"),
        );
        violations.into_result()?;
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: &Date) -> bool {
        &self.from <= date && date <= &self.to
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCategory {
    Upcoming,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "category", rename_all = "snake_case")]
pub enum CalendarEventKind {
    Pickup,
    Return(ReturnCategory),
}

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct CalendarEvent {
    date: Date,
    rental_id: RentalId,
    customer_id: CustomerId,
    kind: CalendarEventKind,
}

impl CalendarEvent {
    pub fn new(
        date: Date,
        rental_id: RentalId,
        customer_id: CustomerId,
        kind: CalendarEventKind,
    ) -> Self {
        Self {
            date,
            rental_id,
            customer_id,
            kind,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct CalendarDay {
    date: Date,
    events: Vec<CalendarEvent>,
}

impl CalendarDay {
    pub fn new(date: Date, events: Vec<CalendarEvent>) -> Self {
        Self { date, events }
    }
}

pub fn return_category(rental: &Rental, today: &Date) -> Option<ReturnCategory> {
    match rental.status() {
        RentalStatus::Cancelled => None,
        RentalStatus::Returned => Some(ReturnCategory::Completed),
        RentalStatus::Active | RentalStatus::Overdue => {
            if rental.is_overdue(today) {
                Some(ReturnCategory::Overdue)
            } else {
                Some(ReturnCategory::Upcoming)
            }
        }
    }
}

/// Buckets pickup and return events of `rentals` into the days of `range`.
/// Days without events are left out; days come back in ascending order.
pub fn derive_calendar(range: &CalendarRange, rentals: &[Rental], today: &Date) -> Vec<CalendarDay> {
    let mut days: BTreeMap<Date, Vec<CalendarEvent>> = BTreeMap::new();
    for rental in rentals {
        let pickup = *rental.rent_date().as_ref();
        if range.contains(&pickup) {
            days.entry(pickup).or_default().push(CalendarEvent::new(
                pickup,
                rental.id().clone(),
                rental.customer_id().clone(),
                CalendarEventKind::Pickup,
            ));
        }
        let due = *rental.expected_return_date().as_ref();
        if let Some(category) = return_category(rental, today).filter(|_| range.contains(&due)) {
            days.entry(due).or_default().push(CalendarEvent::new(
                due,
                rental.id().clone(),
                rental.customer_id().clone(),
                CalendarEventKind::Return(category),
            ));
        }
    }
    days.into_iter()
        .map(|(date, events)| CalendarDay::new(date, events))
        .collect()
}

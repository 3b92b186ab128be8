use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{CalendarDay, CalendarEventKind};

#[derive(Debug, Clone)]
pub struct CalendarEventDto {
    pub rental_id: Uuid,
    pub customer_id: Uuid,
    pub kind: CalendarEventKind,
}

#[derive(Debug, Clone)]
pub struct CalendarDayDto {
    pub date: Date,
    pub events: Vec<CalendarEventDto>,
}

impl From<CalendarDay> for CalendarDayDto {
    fn from(value: CalendarDay) -> Self {
        Self {
            date: *value.date(),
            events: value
                .events()
                .iter()
                .map(|event| CalendarEventDto {
                    rental_id: event.rental_id().clone().into(),
                    customer_id: event.customer_id().clone().into(),
                    kind: *event.kind(),
                })
                .collect(),
        }
    }
}

pub struct GetCalendarDto {
    pub from: Date,
    pub to: Date,
}

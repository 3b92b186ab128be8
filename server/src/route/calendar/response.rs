use serde::Serialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{CalendarDayDto, CalendarEventDto};
use kernel::prelude::entity::{CalendarEventKind, ReturnCategory};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum EventType {
    Pickup,
    Return,
}

#[derive(Debug, Serialize)]
pub struct CalendarEventResponse {
    rental_id: Uuid,
    customer_id: Uuid,
    #[serde(rename = "type")]
    kind: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<ReturnCategory>,
}

impl From<CalendarEventDto> for CalendarEventResponse {
    fn from(value: CalendarEventDto) -> Self {
        let (kind, category) = match value.kind {
            CalendarEventKind::Pickup => (EventType::Pickup, None),
            CalendarEventKind::Return(category) => (EventType::Return, Some(category)),
        };
        Self {
            rental_id: value.rental_id,
            customer_id: value.customer_id,
            kind,
            category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarDayResponse {
    date: Date,
    events: Vec<CalendarEventResponse>,
}

pub struct Presenter;

impl Exhaust<Vec<CalendarDayDto>> for Presenter {
    type To = axum::Json<Vec<CalendarDayResponse>>;
    fn emit(&self, input: Vec<CalendarDayDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(|day| CalendarDayResponse {
                date: day.date,
                events: day
                    .events
                    .into_iter()
                    .map(CalendarEventResponse::from)
                    .collect(),
            })
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

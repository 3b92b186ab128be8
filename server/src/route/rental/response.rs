use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::transfer::RentalDto;
use kernel::prelude::entity::RentalStatus;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    id: Uuid,
    customer_id: Uuid,
    clothing_ids: Vec<Uuid>,
    rent_date: Date,
    expected_return_date: Date,
    actual_return_date: Option<Date>,
    total_value: Decimal,
    status: RentalStatus,
    days_late: i64,
    fine: Decimal,
    notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            clothing_ids: value.clothing_ids,
            rent_date: value.rent_date,
            expected_return_date: value.expected_return_date,
            actual_return_date: value.actual_return_date,
            total_value: value.total_value,
            status: value.status,
            days_late: value.days_late,
            fine: value.fine,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(RentalResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = RentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        RentalResponse::from(input)
    }
}

impl Exhaust<Option<RentalDto>> for Presenter {
    type To = Option<RentalResponse>;
    fn emit(&self, input: Option<RentalDto>) -> Self::To {
        input.map(RentalResponse::from)
    }
}

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = axum::Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(RentalResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

pub struct CreatedPresenter;

impl Exhaust<RentalDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        CreatedResponse(RentalResponse::from(input))
    }
}

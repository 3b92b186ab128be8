use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::StockMovementDto;
use kernel::prelude::entity::MovementKind;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct StockMovementResponse {
    id: Uuid,
    clothing_id: Uuid,
    #[serde(rename = "type")]
    kind: MovementKind,
    quantity: i32,
    previous_quantity: i32,
    new_quantity: i32,
    reason: String,
    recorded_by: String,
    notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    recorded_at: OffsetDateTime,
}

impl From<StockMovementDto> for StockMovementResponse {
    fn from(value: StockMovementDto) -> Self {
        Self {
            id: value.id,
            clothing_id: value.clothing_id,
            kind: value.kind,
            quantity: value.quantity,
            previous_quantity: value.previous_quantity,
            new_quantity: value.new_quantity,
            reason: value.reason,
            recorded_by: value.recorded_by,
            notes: value.notes,
            recorded_at: value.recorded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(StockMovementResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<StockMovementDto> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: StockMovementDto) -> Self::To {
        CreatedResponse(StockMovementResponse::from(input))
    }
}

impl Exhaust<Vec<StockMovementDto>> for Presenter {
    type To = axum::Json<Vec<StockMovementResponse>>;
    fn emit(&self, input: Vec<StockMovementDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(StockMovementResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

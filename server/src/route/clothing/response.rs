use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::transfer::{ClothingDto, StockAlertsDto};
use kernel::prelude::entity::ClothingStatus;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct ClothingResponse {
    id: Uuid,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    size: String,
    color: String,
    category: String,
    price: Decimal,
    status: ClothingStatus,
    quantity: i32,
    min_quantity: i32,
    last_maintenance: Option<Date>,
    next_maintenance: Option<Date>,
    notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<ClothingDto> for ClothingResponse {
    fn from(value: ClothingDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: value.kind,
            size: value.size,
            color: value.color,
            category: value.category,
            price: value.price,
            status: value.status,
            quantity: value.quantity,
            min_quantity: value.min_quantity,
            last_maintenance: value.last_maintenance,
            next_maintenance: value.next_maintenance,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl IntoResponse for ClothingResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(ClothingResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    as_of: Date,
    low_stock: Vec<ClothingResponse>,
    out_of_stock: Vec<ClothingResponse>,
    maintenance_due: Vec<ClothingResponse>,
    total: usize,
}

impl IntoResponse for AlertsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

fn convert(clothes: Vec<ClothingDto>) -> Vec<ClothingResponse> {
    clothes.into_iter().map(ClothingResponse::from).collect()
}

pub struct Presenter;

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Option<ClothingDto>> for Presenter {
    type To = Option<ClothingResponse>;
    fn emit(&self, input: Option<ClothingDto>) -> Self::To {
        input.map(ClothingResponse::from)
    }
}

impl Exhaust<Vec<ClothingDto>> for Presenter {
    type To = axum::Json<Vec<ClothingResponse>>;
    fn emit(&self, input: Vec<ClothingDto>) -> Self::To {
        axum::Json::from(convert(input))
    }
}

pub struct CreatedPresenter;

impl Exhaust<ClothingDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: ClothingDto) -> Self::To {
        CreatedResponse(ClothingResponse::from(input))
    }
}

impl Exhaust<ClothingDto> for Presenter {
    type To = ClothingResponse;
    fn emit(&self, input: ClothingDto) -> Self::To {
        ClothingResponse::from(input)
    }
}

impl Exhaust<StockAlertsDto> for Presenter {
    type To = AlertsResponse;
    fn emit(&self, input: StockAlertsDto) -> Self::To {
        AlertsResponse {
            as_of: input.as_of,
            low_stock: convert(input.low_stock),
            out_of_stock: convert(input.out_of_stock),
            maintenance_due: convert(input.maintenance_due),
            total: input.total,
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::CustomerDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    id: Uuid,
    name: String,
    cpf: String,
    phone: String,
    email: String,
    address: String,
    notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(value: CustomerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            cpf: value.cpf,
            phone: value.phone,
            email: value.email,
            address: value.address,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl IntoResponse for CustomerResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(CustomerResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<CustomerDto> for Presenter {
    type To = CustomerResponse;
    fn emit(&self, input: CustomerDto) -> Self::To {
        CustomerResponse::from(input)
    }
}

impl Exhaust<Option<CustomerDto>> for Presenter {
    type To = Option<CustomerResponse>;
    fn emit(&self, input: Option<CustomerDto>) -> Self::To {
        input.map(CustomerResponse::from)
    }
}

impl Exhaust<Vec<CustomerDto>> for Presenter {
    type To = axum::Json<Vec<CustomerResponse>>;
    fn emit(&self, input: Vec<CustomerDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(CustomerResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

pub struct CreatedPresenter;

impl Exhaust<CustomerDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: CustomerDto) -> Self::To {
        CreatedResponse(CustomerResponse::from(input))
    }
}

use axum::Json;
use error_stack::Report;
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{
    CancelRentalDto, CreateRentalDto, GetRentalDto, GetRentalsDto, ReturnRentalDto,
    UpdateRentalDto,
};
use kernel::prelude::entity::RentalStatus;
use kernel::{FieldViolation, KernelError};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    customer_id: Option<Uuid>,
    #[serde(default)]
    clothing_ids: Vec<Uuid>,
    rent_date: Option<Date>,
    #[serde(alias = "expected_return_date")]
    return_date: Option<Date>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    rent_date: Option<Date>,
    #[serde(alias = "expected_return_date")]
    return_date: Option<Date>,
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnRequest {
    actual_return_date: Option<Date>,
}

impl ReturnRequest {
    /// An empty body returns the rental as of today.
    pub fn from_body(body: &[u8]) -> error_stack::Result<Self, KernelError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Json::<Self>::from_bytes(body)
            .map(|Json(request)| request)
            .map_err(|rejection| {
                Report::new(KernelError::Validation).attach(FieldViolation {
                    field: "actual_return_date",
                    message: rejection.body_text(),
                })
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    customer_id: Option<Uuid>,
    status: Option<RentalStatus>,
    from: Option<Date>,
    to: Option<Date>,
    limit: Option<i32>,
    offset: Option<i32>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct CancelRequest {
    id: Uuid,
}

impl CancelRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateRentalDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateRentalDto {
            customer_id: input.customer_id,
            clothing_ids: input.clothing_ids,
            rent_date: input.rent_date,
            return_date: input.return_date,
            notes: input.notes,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateRentalDto;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Self::To {
        UpdateRentalDto {
            id,
            rent_date: input.rent_date,
            return_date: input.return_date,
            notes: input.notes,
        }
    }
}

impl Intake<(Uuid, ReturnRequest)> for Transformer {
    type To = ReturnRentalDto;
    fn emit(&self, (id, input): (Uuid, ReturnRequest)) -> Self::To {
        ReturnRentalDto {
            id,
            actual_return_date: input.actual_return_date,
        }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetRentalsDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetRentalsDto {
            customer_id: input.customer_id,
            status: input.status,
            from: input.from,
            to: input.to,
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetRentalDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetRentalDto { id: input.id }
    }
}

impl Intake<CancelRequest> for Transformer {
    type To = CancelRentalDto;
    fn emit(&self, input: CancelRequest) -> Self::To {
        CancelRentalDto { id: input.id }
    }
}

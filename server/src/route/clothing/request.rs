use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{
    CreateClothingDto, DeleteClothingDto, GetClothesDto, GetClothingDto, UpdateClothingDto,
};
use kernel::prelude::entity::ClothingStatus;

use crate::controller::Intake;

/// Missing text fields arrive empty so they are reported with the other field errors.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    size: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    category: String,
    price: Decimal,
    status: Option<ClothingStatus>,
    quantity: Option<i32>,
    min_quantity: Option<i32>,
    last_maintenance: Option<Date>,
    next_maintenance: Option<Date>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    size: Option<String>,
    color: Option<String>,
    category: Option<String>,
    price: Option<Decimal>,
    status: Option<ClothingStatus>,
    quantity: Option<i32>,
    min_quantity: Option<i32>,
    last_maintenance: Option<Date>,
    next_maintenance: Option<Date>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    status: Option<ClothingStatus>,
    q: Option<String>,
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
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateClothingDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateClothingDto {
            name: input.name,
            kind: input.kind,
            size: input.size,
            color: input.color,
            category: input.category,
            price: input.price,
            status: input.status,
            quantity: input.quantity,
            min_quantity: input.min_quantity,
            last_maintenance: input.last_maintenance,
            next_maintenance: input.next_maintenance,
            notes: input.notes,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateClothingDto;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Self::To {
        UpdateClothingDto {
            id,
            name: input.name,
            kind: input.kind,
            size: input.size,
            color: input.color,
            category: input.category,
            price: input.price,
            status: input.status,
            quantity: input.quantity,
            min_quantity: input.min_quantity,
            last_maintenance: input.last_maintenance,
            next_maintenance: input.next_maintenance,
            notes: input.notes,
        }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetClothesDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetClothesDto {
            status: input.status,
            q: input.q,
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetClothingDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetClothingDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteClothingDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteClothingDto { id: input.id }
    }
}

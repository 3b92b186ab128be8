use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateCustomerDto, DeleteCustomerDto, GetCustomerDto, GetCustomersDto, GetRentalsDto,
    UpdateCustomerDto,
};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    cpf: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    address: String,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    cpf: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    q: Option<String>,
    cpf: Option<String>,
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

#[derive(Debug)]
pub struct GetRentalsRequest {
    id: Uuid,
}

impl GetRentalsRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateCustomerDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateCustomerDto {
            name: input.name,
            cpf: input.cpf,
            phone: input.phone,
            email: input.email,
            address: input.address,
            notes: input.notes,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateCustomerDto;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Self::To {
        UpdateCustomerDto {
            id,
            name: input.name,
            cpf: input.cpf,
            phone: input.phone,
            email: input.email,
            address: input.address,
            notes: input.notes,
        }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetCustomersDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetCustomersDto {
            q: input.q,
            cpf: input.cpf,
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetCustomerDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetCustomerDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteCustomerDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteCustomerDto { id: input.id }
    }
}

impl Intake<GetRentalsRequest> for Transformer {
    type To = GetRentalsDto;
    fn emit(&self, input: GetRentalsRequest) -> Self::To {
        GetRentalsDto {
            customer_id: Some(input.id),
            ..Default::default()
        }
    }
}

use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Customer, DestructCustomer};

#[derive(Debug, Clone)]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            name,
            cpf,
            phone,
            email,
            address,
            notes,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            cpf: cpf.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            notes: notes.map(String::from),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct GetCustomerDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct GetCustomersDto {
    pub q: Option<String>,
    pub cpf: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateCustomerDto {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

pub struct DeleteCustomerDto {
    pub id: Uuid,
}

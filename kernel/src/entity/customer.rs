mod contact;
mod id;

pub use self::{contact::*, id::*};

use destructure::{Destructure, Mutation};
use vodca::References;

use crate::entity::{CreatedAt, Notes, UpdatedAt};
use crate::{KernelError, Violations};

const CPF_LENGTH: std::ops::RangeInclusive<usize> = 11..=14;
const MIN_PHONE_LENGTH: usize = 10;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    cpf: Cpf,
    phone: Phone,
    email: Email,
    address: Address,
    notes: Option<Notes>,
    created_at: CreatedAt<Customer>,
    updated_at: UpdatedAt<Customer>,
}

impl Customer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CustomerId,
        name: CustomerName,
        cpf: Cpf,
        phone: Phone,
        email: Email,
        address: Address,
        notes: Option<Notes>,
        created_at: CreatedAt<Customer>,
        updated_at: UpdatedAt<Customer>,
    ) -> Self {
        Self {
            id,
            name,
            cpf,
            phone,
            email,
            address,
            notes,
            created_at,
            updated_at,
        }
    }

    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        let mut violations = Violations::new();
        violations.check(
            !self.name.as_ref().trim().is_empty(),
            "name",
            "name is required",
        );
        violations.check(
            CPF_LENGTH.contains(&self.cpf.as_ref().trim().chars().count()),
            "cpf",
            "CPF must have between 11 and 14 characters",
        );
        violations.check(
            self.phone.as_ref().trim().chars().count() >= MIN_PHONE_LENGTH,
            "phone",
            "phone must have at least 10 characters",
        );
        violations.check(
            Email::is_well_formed(self.email.as_ref()),
            "email",
            "email is not a valid address",
        );
        violations.check(
            !self.address.as_ref().trim().is_empty(),
            "address",
            "address is required",
        );
        violations.into_result()
    }
}

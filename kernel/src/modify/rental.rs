use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Rental;
use crate::KernelError;

/// Rentals are never hard deleted; closing one goes through `update`.
#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores the rental together with its ordered item list.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}

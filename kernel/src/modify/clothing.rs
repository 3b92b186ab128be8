use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Clothing, ClothingId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ClothingModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        clothing: &Clothing,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        clothing: &Clothing,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        clothing_id: &ClothingId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnClothingModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ClothingModifier: ClothingModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn clothing_modifier(&self) -> &Self::ClothingModifier;
}

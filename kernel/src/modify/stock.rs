use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::StockMovement;
use crate::KernelError;

/// The movement ledger is append-only.
#[async_trait::async_trait]
pub trait StockMovementModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        movement: &StockMovement,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnStockMovementModifier:
    'static + Sync + Send + DependOnDatabaseConnection
{
    type StockMovementModifier: StockMovementModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn stock_movement_modifier(&self) -> &Self::StockMovementModifier;
}

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ClothingId, StockMovement};
use crate::KernelError;

#[async_trait::async_trait]
pub trait StockMovementQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Most recent first. `None` lists the whole ledger.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        clothing_id: Option<&ClothingId>,
    ) -> error_stack::Result<Vec<StockMovement>, KernelError>;
}

pub trait DependOnStockMovementQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type StockMovementQuery: StockMovementQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn stock_movement_query(&self) -> &Self::StockMovementQuery;
}

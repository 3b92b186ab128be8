use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Clothing, ClothingId, ClothingStatus, SelectLimit, SelectOffset};
use crate::KernelError;

#[derive(Debug, Clone, Default)]
pub struct ClothingFilter {
    pub status: Option<ClothingStatus>,
    /// Case-insensitive match against name, type or color.
    pub search: Option<String>,
    pub limit: Option<SelectLimit>,
    pub offset: SelectOffset,
}

impl ClothingFilter {
    pub fn matches(&self, clothing: &Clothing) -> bool {
        let status = self
            .status
            .map(|status| &status == clothing.status())
            .unwrap_or(true);
        let search = self
            .search
            .as_deref()
            .map(|term| {
                let term = term.to_lowercase();
                [
                    clothing.name().as_ref(),
                    clothing.kind().as_ref(),
                    clothing.color().as_ref(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            })
            .unwrap_or(true);
        status && search
    }
}

#[async_trait::async_trait]
pub trait ClothingQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ClothingId,
    ) -> error_stack::Result<Option<Clothing>, KernelError>;

    /// Rows come back locked until the transaction ends. Unknown ids are skipped.
    async fn find_by_ids_for_update(
        &self,
        con: &mut Self::Transaction,
        ids: &[ClothingId],
    ) -> error_stack::Result<Vec<Clothing>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        filter: &ClothingFilter,
    ) -> error_stack::Result<Vec<Clothing>, KernelError>;
}

pub trait DependOnClothingQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ClothingQuery: ClothingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn clothing_query(&self) -> &Self::ClothingQuery;
}

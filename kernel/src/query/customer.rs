use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Customer, CustomerId, SelectLimit, SelectOffset};
use crate::KernelError;

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Case-insensitive match against name, CPF or email.
    pub search: Option<String>,
    pub cpf: Option<String>,
    pub limit: Option<SelectLimit>,
    pub offset: SelectOffset,
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        let cpf = self
            .cpf
            .as_deref()
            .map(|cpf| customer.cpf().as_ref() == cpf)
            .unwrap_or(true);
        let search = self
            .search
            .as_deref()
            .map(|term| {
                let term = term.to_lowercase();
                [
                    customer.name().as_ref(),
                    customer.cpf().as_ref(),
                    customer.email().as_ref(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            })
            .unwrap_or(true);
        cpf && search
    }
}

#[async_trait::async_trait]
pub trait CustomerQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        filter: &CustomerFilter,
    ) -> error_stack::Result<Vec<Customer>, KernelError>;
}

pub trait DependOnCustomerQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CustomerQuery: CustomerQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn customer_query(&self) -> &Self::CustomerQuery;
}

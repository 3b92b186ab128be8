use time::Date;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CustomerId, Rental, RentalId, RentalStatus, SelectLimit, SelectOffset};
use crate::KernelError;

/// Rental listing criteria. `status` is the effective status, so `Overdue`
/// selects open rentals whose expected return date is before `today`.
#[derive(Debug, Clone)]
pub struct RentalFilter {
    pub customer_id: Option<CustomerId>,
    pub status: Option<RentalStatus>,
    pub rented_from: Option<Date>,
    pub rented_to: Option<Date>,
    pub today: Date,
    pub limit: Option<SelectLimit>,
    pub offset: SelectOffset,
}

impl RentalFilter {
    pub fn new(today: Date) -> Self {
        Self {
            customer_id: None,
            status: None,
            rented_from: None,
            rented_to: None,
            today,
            limit: None,
            offset: SelectOffset::default(),
        }
    }

    pub fn matches(&self, rental: &Rental) -> bool {
        let rent_date = rental.rent_date().as_ref();
        self.customer_id
            .as_ref()
            .map(|id| id == rental.customer_id())
            .unwrap_or(true)
            && self
                .status
                .map(|status| status == rental.effective_status(&self.today))
                .unwrap_or(true)
            && self.rented_from.map(|from| rent_date >= &from).unwrap_or(true)
            && self.rented_to.map(|to| rent_date <= &to).unwrap_or(true)
    }
}

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    /// Same as `find_by_id`, but the row stays locked until the transaction ends.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        filter: &RentalFilter,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    /// Rentals whose rent date or expected return date falls inside `from..=to`.
    async fn find_touching(
        &self,
        con: &mut Self::Transaction,
        from: &Date,
        to: &Date,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    async fn count_open_by_customer_id(
        &self,
        con: &mut Self::Transaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use error_stack::Report;
use time::macros::datetime;
use time::Date;

use kernel::interface::clock::{DependOnClock, FixedClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::policy::DependOnFinePolicy;
use kernel::interface::query::{
    ClothingFilter, ClothingQuery, CustomerFilter, CustomerQuery, DependOnClothingQuery,
    DependOnCustomerQuery, DependOnRentalQuery, DependOnStockMovementQuery, RentalFilter,
    RentalQuery, StockMovementQuery,
};
use kernel::interface::update::{
    ClothingModifier, CustomerModifier, DependOnClothingModifier, DependOnCustomerModifier,
    DependOnRentalModifier, DependOnStockMovementModifier, RentalModifier, StockMovementModifier,
};
use kernel::prelude::entity::{
    paginate, Clothing, ClothingId, Customer, CustomerId, FinePolicy, Rental, RentalId,
    StockMovement,
};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub clothes: HashMap<ClothingId, Clothing>,
    pub customers: HashMap<CustomerId, Customer>,
    pub rentals: HashMap<RentalId, Rental>,
    pub movements: Vec<StockMovement>,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryDatabase(Arc<Mutex<State>>);

/// Works on a snapshot of the shared state and publishes it on commit.
/// Clothing and rental rows must be read for update before they are written.
pub(crate) struct MemoryTransaction {
    shared: Arc<Mutex<State>>,
    staged: State,
    locked_clothes: HashSet<ClothingId>,
    locked_rentals: HashSet<RentalId>,
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<MemoryTransaction, KernelError> {
        let staged = self.0.lock().unwrap().clone();
        Ok(MemoryTransaction {
            shared: Arc::clone(&self.0),
            staged,
            locked_clothes: HashSet::new(),
            locked_rentals: HashSet::new(),
        })
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        *self.shared.lock().unwrap() = self.staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

pub(crate) struct MemoryRepository;

#[async_trait::async_trait]
impl ClothingQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &ClothingId,
    ) -> error_stack::Result<Option<Clothing>, KernelError> {
        Ok(con.staged.clothes.get(id).cloned())
    }

    async fn find_by_ids_for_update(
        &self,
        con: &mut MemoryTransaction,
        ids: &[ClothingId],
    ) -> error_stack::Result<Vec<Clothing>, KernelError> {
        let found = ids
            .iter()
            .filter_map(|id| con.staged.clothes.get(id).cloned())
            .collect::<Vec<_>>();
        con.locked_clothes
            .extend(found.iter().map(|clothing| clothing.id().clone()));
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        filter: &ClothingFilter,
    ) -> error_stack::Result<Vec<Clothing>, KernelError> {
        let mut clothes = con
            .staged
            .clothes
            .values()
            .filter(|clothing| filter.matches(clothing))
            .cloned()
            .collect::<Vec<_>>();
        clothes.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(paginate(clothes, filter.limit.as_ref(), &filter.offset))
    }
}

#[async_trait::async_trait]
impl ClothingModifier for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        clothing: &Clothing,
    ) -> error_stack::Result<(), KernelError> {
        con.staged
            .clothes
            .insert(clothing.id().clone(), clothing.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        clothing: &Clothing,
    ) -> error_stack::Result<(), KernelError> {
        if !con.locked_clothes.contains(clothing.id()) {
            return Err(unlocked("clothing", clothing.id().as_ref()));
        }
        con.staged
            .clothes
            .insert(clothing.id().clone(), clothing.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        clothing_id: &ClothingId,
    ) -> error_stack::Result<(), KernelError> {
        if !con.locked_clothes.contains(clothing_id) {
            return Err(unlocked("clothing", clothing_id.as_ref()));
        }
        con.staged.clothes.remove(clothing_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl CustomerQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.staged.customers.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        filter: &CustomerFilter,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut customers = con
            .staged
            .customers
            .values()
            .filter(|customer| filter.matches(customer))
            .cloned()
            .collect::<Vec<_>>();
        customers.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(paginate(customers, filter.limit.as_ref(), &filter.offset))
    }
}

#[async_trait::async_trait]
impl CustomerModifier for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        con.staged
            .customers
            .insert(customer.id().clone(), customer.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        con.staged
            .customers
            .insert(customer.id().clone(), customer.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.customers.remove(customer_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl RentalQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.staged.rentals.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let found = con.staged.rentals.get(id).cloned();
        if found.is_some() {
            con.locked_rentals.insert(id.clone());
        }
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        filter: &RentalFilter,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con
            .staged
            .rentals
            .values()
            .filter(|rental| filter.matches(rental))
            .cloned()
            .collect::<Vec<_>>();
        rentals.sort_by(|a, b| b.rent_date().as_ref().cmp(a.rent_date().as_ref()));
        Ok(paginate(rentals, filter.limit.as_ref(), &filter.offset))
    }

    async fn find_touching(
        &self,
        con: &mut MemoryTransaction,
        from: &Date,
        to: &Date,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let inside = |date: &Date| from <= date && date <= to;
        Ok(con
            .staged
            .rentals
            .values()
            .filter(|rental| {
                inside(rental.rent_date().as_ref())
                    || inside(rental.expected_return_date().as_ref())
            })
            .cloned()
            .collect())
    }

    async fn count_open_by_customer_id(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<i64, KernelError> {
        let open = con
            .staged
            .rentals
            .values()
            .filter(|rental| rental.customer_id() == customer_id && rental.is_open())
            .count();
        Ok(open as i64)
    }
}

#[async_trait::async_trait]
impl RentalModifier for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.rentals.insert(rental.id().clone(), rental.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if !con.locked_rentals.contains(rental.id()) {
            return Err(unlocked("rental", rental.id().as_ref()));
        }
        con.staged.rentals.insert(rental.id().clone(), rental.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl StockMovementQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        clothing_id: Option<&ClothingId>,
    ) -> error_stack::Result<Vec<StockMovement>, KernelError> {
        Ok(con
            .staged
            .movements
            .iter()
            .rev()
            .filter(|movement| {
                clothing_id
                    .map(|id| movement.clothing_id() == id)
                    .unwrap_or(true)
            })
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl StockMovementModifier for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        movement: &StockMovement,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.movements.push(movement.clone());
        Ok(())
    }
}

/// Wires the in-memory store the way the server's handler wires Postgres.
fn unlocked(table: &str, id: &uuid::Uuid) -> Report<KernelError> {
    Report::new(KernelError::Internal)
        .attach_printable(format!("{table} {id} was written without a row lock"))
}

pub(crate) struct TestModule {
    database: MemoryDatabase,
    repository: MemoryRepository,
    clock: FixedClock,
    policy: FinePolicy,
}

impl TestModule {
    pub fn new() -> Self {
        Self::at(datetime!(2024-01-03 10:00 UTC))
    }

    pub fn at(now: time::OffsetDateTime) -> Self {
        Self {
            database: MemoryDatabase::default(),
            repository: MemoryRepository,
            clock: FixedClock::new(now),
            policy: FinePolicy::default(),
        }
    }

    /// Same committed data, seen from another instant.
    pub fn travel_to(&self, now: time::OffsetDateTime) -> Self {
        Self {
            database: self.database.clone(),
            repository: MemoryRepository,
            clock: FixedClock::new(now),
            policy: self.policy.clone(),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.database.0.lock().unwrap()
    }
}

impl DependOnDatabaseConnection for TestModule {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &MemoryDatabase {
        &self.database
    }
}

impl DependOnClock for TestModule {
    type Clock = FixedClock;
    fn clock(&self) -> &FixedClock {
        &self.clock
    }
}

impl DependOnFinePolicy for TestModule {
    fn fine_policy(&self) -> &FinePolicy {
        &self.policy
    }
}

impl DependOnClothingQuery for TestModule {
    type ClothingQuery = MemoryRepository;
    fn clothing_query(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnClothingModifier for TestModule {
    type ClothingModifier = MemoryRepository;
    fn clothing_modifier(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnCustomerQuery for TestModule {
    type CustomerQuery = MemoryRepository;
    fn customer_query(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnCustomerModifier for TestModule {
    type CustomerModifier = MemoryRepository;
    fn customer_modifier(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnRentalQuery for TestModule {
    type RentalQuery = MemoryRepository;
    fn rental_query(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnRentalModifier for TestModule {
    type RentalModifier = MemoryRepository;
    fn rental_modifier(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnStockMovementQuery for TestModule {
    type StockMovementQuery = MemoryRepository;
    fn stock_movement_query(&self) -> &MemoryRepository {
        &self.repository
    }
}

impl DependOnStockMovementModifier for TestModule {
    type StockMovementModifier = MemoryRepository;
    fn stock_movement_modifier(&self) -> &MemoryRepository {
        &self.repository
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{
        ClothingId, CreatedAt, CustomerId, ExpectedReturnDate, Rental, RentalId, RentalStatus,
        RentDate, TotalValue, UpdatedAt,
    };
    use kernel::KernelError;

    use super::{MemoryRepository, TestModule};

    #[tokio::test]
    async fn rental_writes_need_a_row_lock() {
        let module = TestModule::new();
        let now = datetime!(2024-01-01 09:00 UTC);
        let rental = Rental::new(
            RentalId::new(Uuid::new_v4()),
            CustomerId::new(Uuid::new_v4()),
            vec![ClothingId::new(Uuid::new_v4())],
            RentDate::new(date!(2024 - 01 - 01)),
            ExpectedReturnDate::new(date!(2024 - 01 - 05)),
            None,
            TotalValue::new(dec!(50.00)),
            RentalStatus::Active,
            None,
            None,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        module
            .state()
            .rentals
            .insert(rental.id().clone(), rental.clone());

        let mut con = module.database_connection().transact().await.unwrap();
        MemoryRepository.find_by_id(&mut con, rental.id()).await.unwrap();
        let report = MemoryRepository.update(&mut con, &rental).await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Internal));

        MemoryRepository
            .find_by_id_for_update(&mut con, rental.id())
            .await
            .unwrap();
        MemoryRepository.update(&mut con, &rental).await.unwrap();
    }
}

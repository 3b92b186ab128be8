use std::ops::Deref;
use std::sync::Arc;

use vodca::References;

use driver::clock::SystemClock;
use driver::config::AppConfig;
use driver::database::{
    PostgresClothingRepository, PostgresCustomerRepository, PostgresDatabase,
    PostgresRentalRepository, PostgresStockMovementRepository,
};
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::policy::DependOnFinePolicy;
use kernel::interface::query::{
    DependOnClothingQuery, DependOnCustomerQuery, DependOnRentalQuery, DependOnStockMovementQuery,
};
use kernel::interface::update::{
    DependOnClothingModifier, DependOnCustomerModifier, DependOnRentalModifier,
    DependOnStockMovementModifier,
};
use kernel::prelude::entity::FinePolicy;
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(config: &AppConfig) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(config).await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    clothes: PostgresClothingRepository,
    customers: PostgresCustomerRepository,
    rentals: PostgresRentalRepository,
    movements: PostgresStockMovementRepository,
    system_clock: SystemClock,
    policy: FinePolicy,
}

impl Handler {
    pub async fn init(config: &AppConfig) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self {
            pgpool,
            clothes: PostgresClothingRepository,
            customers: PostgresCustomerRepository,
            rentals: PostgresRentalRepository,
            movements: PostgresStockMovementRepository,
            system_clock: SystemClock::new(config.business_offset),
            policy: config.fine_policy.clone(),
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &PostgresDatabase {
        &self.pgpool
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &SystemClock {
        &self.system_clock
    }
}

impl DependOnFinePolicy for Handler {
    fn fine_policy(&self) -> &FinePolicy {
        &self.policy
    }
}

impl DependOnClothingQuery for Handler {
    type ClothingQuery = PostgresClothingRepository;
    fn clothing_query(&self) -> &PostgresClothingRepository {
        &self.clothes
    }
}

impl DependOnClothingModifier for Handler {
    type ClothingModifier = PostgresClothingRepository;
    fn clothing_modifier(&self) -> &PostgresClothingRepository {
        &self.clothes
    }
}

impl DependOnCustomerQuery for Handler {
    type CustomerQuery = PostgresCustomerRepository;
    fn customer_query(&self) -> &PostgresCustomerRepository {
        &self.customers
    }
}

impl DependOnCustomerModifier for Handler {
    type CustomerModifier = PostgresCustomerRepository;
    fn customer_modifier(&self) -> &PostgresCustomerRepository {
        &self.customers
    }
}

impl DependOnRentalQuery for Handler {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &PostgresRentalRepository {
        &self.rentals
    }
}

impl DependOnRentalModifier for Handler {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &PostgresRentalRepository {
        &self.rentals
    }
}

impl DependOnStockMovementQuery for Handler {
    type StockMovementQuery = PostgresStockMovementRepository;
    fn stock_movement_query(&self) -> &PostgresStockMovementRepository {
        &self.movements
    }
}

impl DependOnStockMovementModifier for Handler {
    type StockMovementModifier = PostgresStockMovementRepository;
    fn stock_movement_modifier(&self) -> &PostgresStockMovementRepository {
        &self.movements
    }
}

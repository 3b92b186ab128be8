use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::policy::DependOnFinePolicy;
use kernel::interface::query::{
    ClothingFilter, ClothingQuery, DependOnClothingQuery, DependOnRentalQuery, RentalFilter,
    RentalQuery,
};
use kernel::prelude::entity::{CustomerId, InventoryCounts, RentalCounts, RentalSummary};
use kernel::KernelError;

use crate::transfer::{DashboardDto, GetRentalReportDto, RentalDto, RentalReportDto};

#[async_trait::async_trait]
pub trait GetRentalReportService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnClock
    + DependOnFinePolicy
{
    async fn get_rental_report(
        &self,
        dto: GetRentalReportDto,
    ) -> error_stack::Result<RentalReportDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let today = self.clock().today();
        let filter = RentalFilter {
            customer_id: dto.customer_id.map(CustomerId::new),
            status: dto.status,
            rented_from: dto.from,
            rented_to: dto.to,
            ..RentalFilter::new(today)
        };
        let rentals = self.rental_query().find_all(&mut connection, &filter).await?;
        let summary = RentalSummary::of(&rentals);
        let rentals = rentals
            .into_iter()
            .map(|rental| RentalDto::new(rental, self.fine_policy(), &today))
            .collect();
        Ok(RentalReportDto::new(rentals, summary))
    }
}

impl<T> GetRentalReportService for T where
    T: DependOnDatabaseConnection + DependOnRentalQuery + DependOnClock + DependOnFinePolicy
{
}

#[async_trait::async_trait]
pub trait GetDashboardService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClothingQuery
    + DependOnRentalQuery
    + DependOnClock
{
    async fn get_dashboard(&self) -> error_stack::Result<DashboardDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let today = self.clock().today();
        let clothes = self
            .clothing_query()
            .find_all(&mut connection, &ClothingFilter::default())
            .await?;
        let rentals = self
            .rental_query()
            .find_all(&mut connection, &RentalFilter::new(today))
            .await?;
        let counts = RentalCounts::of(&rentals, &today);
        Ok(DashboardDto::new(
            InventoryCounts::of(&clothes),
            *counts.active(),
            *counts.overdue(),
            *RentalSummary::of(&rentals).revenue(),
        ))
    }
}

impl<T> GetDashboardService for T where
    T: DependOnDatabaseConnection
        + DependOnClothingQuery
        + DependOnRentalQuery
        + DependOnClock
{
}

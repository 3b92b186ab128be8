use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{InventoryCounts, RentalStatus, RentalSummary};

use crate::transfer::RentalDto;

#[derive(Debug, Clone, Default)]
pub struct GetRentalReportDto {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub status: Option<RentalStatus>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct RentalReportDto {
    pub rentals: Vec<RentalDto>,
    pub rental_count: usize,
    pub revenue: Decimal,
    pub fines: Decimal,
}

impl RentalReportDto {
    pub fn new(rentals: Vec<RentalDto>, summary: RentalSummary) -> Self {
        Self {
            rentals,
            rental_count: *summary.rental_count(),
            revenue: *summary.revenue(),
            fines: *summary.fines(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardDto {
    pub available_clothes: usize,
    pub rented_clothes: usize,
    pub washing_clothes: usize,
    pub damaged_clothes: usize,
    pub active_rentals: usize,
    pub overdue_rentals: usize,
    pub total_revenue: Decimal,
}

impl DashboardDto {
    pub fn new(
        inventory: InventoryCounts,
        active_rentals: usize,
        overdue_rentals: usize,
        total_revenue: Decimal,
    ) -> Self {
        Self {
            available_clothes: *inventory.available(),
            rented_clothes: *inventory.rented(),
            washing_clothes: *inventory.washing(),
            damaged_clothes: *inventory.damaged(),
            active_rentals,
            overdue_rentals,
            total_revenue,
        }
    }
}

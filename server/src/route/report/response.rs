use rust_decimal::Decimal;
use serde::Serialize;

use application::transfer::{DashboardDto, RentalReportDto};

use crate::controller::Exhaust;
use crate::route::rental::RentalResponse;

#[derive(Debug, Serialize)]
pub struct RentalReportResponse {
    rentals: Vec<RentalResponse>,
    rental_count: usize,
    revenue: Decimal,
    fines: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    available_clothes: usize,
    rented_clothes: usize,
    washing_clothes: usize,
    damaged_clothes: usize,
    active_rentals: usize,
    overdue_rentals: usize,
    total_revenue: Decimal,
}

pub struct Presenter;

impl Exhaust<RentalReportDto> for Presenter {
    type To = axum::Json<RentalReportResponse>;
    fn emit(&self, input: RentalReportDto) -> Self::To {
        axum::Json(RentalReportResponse {
            rentals: input
                .rentals
                .into_iter()
                .map(RentalResponse::from)
                .collect(),
            rental_count: input.rental_count,
            revenue: input.revenue,
            fines: input.fines,
        })
    }
}

impl Exhaust<DashboardDto> for Presenter {
    type To = axum::Json<DashboardResponse>;
    fn emit(&self, input: DashboardDto) -> Self::To {
        axum::Json(DashboardResponse {
            available_clothes: input.available_clothes,
            rented_clothes: input.rented_clothes,
            washing_clothes: input.washing_clothes,
            damaged_clothes: input.damaged_clothes,
            active_rentals: input.active_rentals,
            overdue_rentals: input.overdue_rentals,
            total_revenue: input.total_revenue,
        })
    }
}

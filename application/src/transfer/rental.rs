use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{DestructRental, FinePolicy, Rental, RentalStatus};

/// A rental as seen on `today`: status is the effective one and the fine is
/// either the settled amount or what has accrued so far.
#[derive(Debug, Clone)]
pub struct RentalDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub clothing_ids: Vec<Uuid>,
    pub rent_date: Date,
    pub expected_return_date: Date,
    pub actual_return_date: Option<Date>,
    pub total_value: Decimal,
    pub status: RentalStatus,
    pub days_late: i64,
    pub fine: Decimal,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl RentalDto {
    pub fn new(rental: Rental, policy: &FinePolicy, today: &Date) -> Self {
        let status = rental.effective_status(today);
        let assessment = rental.fine_assessment(policy, today);
        let DestructRental {
            id,
            customer_id,
            clothing_ids,
            rent_date,
            expected_return_date,
            returned_at,
            total_value,
            status: _,
            fine: _,
            notes,
            created_at,
            updated_at,
        } = rental.into_destruct();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            clothing_ids: clothing_ids.into_iter().map(Uuid::from).collect(),
            rent_date: rent_date.into(),
            expected_return_date: expected_return_date.into(),
            actual_return_date: returned_at.map(Date::from),
            total_value: total_value.into(),
            status,
            days_late: (*assessment.days_late()).into(),
            fine: (*assessment.amount()).into(),
            notes: notes.map(String::from),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct GetRentalDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct GetRentalsDto {
    pub customer_id: Option<Uuid>,
    pub status: Option<RentalStatus>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// Every field is optional here so that missing input is reported per field.
#[derive(Debug, Clone, Default)]
pub struct CreateRentalDto {
    pub customer_id: Option<Uuid>,
    pub clothing_ids: Vec<Uuid>,
    pub rent_date: Option<Date>,
    pub return_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRentalDto {
    pub id: Uuid,
    pub rent_date: Option<Date>,
    pub return_date: Option<Date>,
    pub notes: Option<String>,
}

/// Without an actual return date the rental is returned as of today.
#[derive(Debug, Clone, Default)]
pub struct ReturnRentalDto {
    pub id: Uuid,
    pub actual_return_date: Option<Date>,
}

pub struct CancelRentalDto {
    pub id: Uuid,
}

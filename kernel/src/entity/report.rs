use rust_decimal::Decimal;
use time::Date;
use vodca::References;

use crate::entity::{Clothing, ClothingStatus, Rental, RentalStatus};

/// Totals over a set of rentals. Cancelled rentals count but earn nothing.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, References)]
pub struct RentalSummary {
    rental_count: usize,
    revenue: Decimal,
    fines: Decimal,
}

impl RentalSummary {
    pub fn of<'a>(rentals: impl IntoIterator<Item = &'a Rental>) -> Self {
        rentals
            .into_iter()
            .fold(Self::default(), |mut summary, rental| {
                summary.rental_count += 1;
                if *rental.status() != RentalStatus::Cancelled {
                    let fine = rental
                        .fine()
                        .map(Decimal::from)
                        .unwrap_or_default();
                    summary.revenue += *rental.total_value().as_ref() + fine;
                    summary.fines += fine;
                }
                summary
            })
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, References)]
pub struct InventoryCounts {
    available: usize,
    rented: usize,
    washing: usize,
    damaged: usize,
}

impl InventoryCounts {
    pub fn of<'a>(clothes: impl IntoIterator<Item = &'a Clothing>) -> Self {
        clothes
            .into_iter()
            .fold(Self::default(), |mut counts, clothing| {
                match clothing.status() {
                    ClothingStatus::Available => counts.available += 1,
                    ClothingStatus::Rented => counts.rented += 1,
                    ClothingStatus::Washing => counts.washing += 1,
                    ClothingStatus::Damaged => counts.damaged += 1,
                }
                counts
            })
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, References)]
pub struct RentalCounts {
    active: usize,
    overdue: usize,
}

impl RentalCounts {
    pub fn of<'a>(rentals: impl IntoIterator<Item = &'a Rental>, today: &Date) -> Self {
        rentals
            .into_iter()
            .fold(Self::default(), |mut counts, rental| {
                match rental.effective_status(today) {
                    RentalStatus::Active => counts.active += 1,
                    RentalStatus::Overdue => counts.overdue += 1,
                    RentalStatus::Returned | RentalStatus::Cancelled => {}
                }
                counts
            })
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct StockAlerts {
    low_stock: Vec<Clothing>,
    out_of_stock: Vec<Clothing>,
    maintenance_due: Vec<Clothing>,
}

impl StockAlerts {
    pub fn of(clothes: Vec<Clothing>, today: &Date) -> Self {
        clothes
            .into_iter()
            .fold(Self::default(), |mut alerts, clothing| {
                if clothing.is_low_stock() {
                    alerts.low_stock.push(clothing.clone());
                }
                if clothing.is_out_of_stock() {
                    alerts.out_of_stock.push(clothing.clone());
                }
                if clothing.is_maintenance_due(*today) {
                    alerts.maintenance_due.push(clothing);
                }
                alerts
            })
    }

    pub fn total(&self) -> usize {
        self.low_stock.len() + self.out_of_stock.len() + self.maintenance_due.len()
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::{RentalCounts, RentalSummary};
    use crate::entity::{
        CreatedAt, CustomerId, ExpectedReturnDate, FineAmount, RentDate, Rental, RentalId,
        RentalStatus, ReturnedAt, TotalValue, UpdatedAt,
    };

    fn rental(total: rust_decimal::Decimal, status: RentalStatus, fine: Option<FineAmount>) -> Rental {
        let now = datetime!(2024-01-01 00:00 UTC);
        Rental::new(
            RentalId::new(Uuid::new_v4()),
            CustomerId::new(Uuid::new_v4()),
            vec![],
            RentDate::new(date!(2024 - 01 - 01)),
            ExpectedReturnDate::new(date!(2024 - 01 - 08)),
            (status == RentalStatus::Returned).then(|| ReturnedAt::new(date!(2024 - 01 - 10))),
            TotalValue::new(total),
            status,
            fine,
            None,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    #[test]
    fn revenue_adds_fines_and_skips_cancelled() {
        let rentals = [
            rental(dec!(80), RentalStatus::Returned, Some(FineAmount::new(dec!(40)))),
            rental(dec!(50), RentalStatus::Active, None),
            rental(dec!(999), RentalStatus::Cancelled, None),
        ];
        let summary = RentalSummary::of(&rentals);
        assert_eq!(summary.rental_count(), &3);
        assert_eq!(summary.revenue(), &dec!(170));
        assert_eq!(summary.fines(), &dec!(40));
    }

    #[test]
    fn counts_split_active_and_overdue() {
        let rentals = [
            rental(dec!(10), RentalStatus::Active, None),
            rental(dec!(10), RentalStatus::Returned, Some(FineAmount::zero())),
        ];
        let before = RentalCounts::of(&rentals, &date!(2024 - 01 - 08));
        assert_eq!((before.active(), before.overdue()), (&1, &0));
        let after = RentalCounts::of(&rentals, &date!(2024 - 01 - 09));
        assert_eq!((after.active(), after.overdue()), (&0, &1));
    }
}

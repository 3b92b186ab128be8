mod date;
mod fine;
mod id;
mod status;
mod value;

pub use self::{date::*, fine::*, id::*, status::*, value::*};

use std::collections::HashSet;

use destructure::{Destructure, Mutation};
use error_stack::Report;
use time::{Date, OffsetDateTime};
use vodca::References;

use crate::entity::{Clothing, ClothingId, CreatedAt, CustomerId, Notes, UpdatedAt};
use crate::{KernelError, Violations};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Rental {
    id: RentalId,
    customer_id: CustomerId,
    clothing_ids: Vec<ClothingId>,
    rent_date: RentDate,
    expected_return_date: ExpectedReturnDate,
    returned_at: Option<ReturnedAt>,
    total_value: TotalValue,
    status: RentalStatus,
    fine: Option<FineAmount>,
    notes: Option<Notes>,
    created_at: CreatedAt<Rental>,
    updated_at: UpdatedAt<Rental>,
}

impl Rental {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RentalId,
        customer_id: CustomerId,
        clothing_ids: Vec<ClothingId>,
        rent_date: RentDate,
        expected_return_date: ExpectedReturnDate,
        returned_at: Option<ReturnedAt>,
        total_value: TotalValue,
        status: RentalStatus,
        fine: Option<FineAmount>,
        notes: Option<Notes>,
        created_at: CreatedAt<Rental>,
        updated_at: UpdatedAt<Rental>,
    ) -> Self {
        Self {
            id,
            customer_id,
            clothing_ids,
            rent_date,
            expected_return_date,
            returned_at,
            total_value,
            status,
            fine,
            notes,
            created_at,
            updated_at,
        }
    }

    /// Opens a rental over `items`, fixing the total at their current prices.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: RentalId,
        customer_id: CustomerId,
        items: &[Clothing],
        rent_date: RentDate,
        expected_return_date: ExpectedReturnDate,
        notes: Option<Notes>,
        now: OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError> {
        let mut violations = Violations::new();
        violations.check(
            !items.is_empty(),
            "clothing_ids",
            "select at least one clothing item",
        );
        let mut seen = HashSet::new();
        violations.check(
            items.iter().all(|item| seen.insert(item.id())),
            "clothing_ids",
            "a clothing item was selected more than once",
        );
        violations.check(
            expected_return_date.as_ref() >= rent_date.as_ref(),
            "return_date",
            "return date must not be before the rent date",
        );
        violations.into_result()?;

        if let Some(item) = items.iter().find(|item| !item.is_available()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Clothing {} is {} and cannot be rented",
                item.id().as_ref(),
                item.status()
            )));
        }

        Ok(Self {
            id,
            customer_id,
            clothing_ids: items.iter().map(|item| item.id().clone()).collect(),
            rent_date,
            expected_return_date,
            returned_at: None,
            total_value: TotalValue::of(items.iter().map(Clothing::price)),
            status: RentalStatus::Active,
            fine: None,
            notes,
            created_at: CreatedAt::new(now),
            updated_at: UpdatedAt::new(now),
        })
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn is_overdue(&self, today: &Date) -> bool {
        self.is_open() && today > self.expected_return_date.as_ref()
    }

    /// Open rentals past their due day read as overdue.
    pub fn effective_status(&self, today: &Date) -> RentalStatus {
        if self.is_overdue(today) {
            RentalStatus::Overdue
        } else if self.is_open() {
            RentalStatus::Active
        } else {
            self.status
        }
    }

    pub fn fine_assessment(&self, policy: &FinePolicy, today: &Date) -> FineAssessment {
        match (self.status, self.returned_at) {
            (RentalStatus::Returned, Some(returned_at)) => FineAssessment::new(
                DaysLate::between(self.expected_return_date.as_ref(), returned_at.as_ref()),
                self.fine.unwrap_or_default(),
            ),
            (status, _) if status.is_open() => {
                policy.assess(&self.expected_return_date, today)
            }
            _ => FineAssessment::none(),
        }
    }

    /// Closes an open rental on `returned_at`, charging the fine for any late days.
    pub fn settle(
        self,
        returned_at: ReturnedAt,
        policy: &FinePolicy,
        now: OffsetDateTime,
    ) -> error_stack::Result<(Self, FineAssessment), KernelError> {
        self.ensure_open("returned")?;
        let mut violations = Violations::new();
        violations.check(
            returned_at.as_ref() >= self.rent_date.as_ref(),
            "actual_return_date",
            "return date must not be before the rent date",
        );
        violations.into_result()?;

        let assessment = policy.assess(&self.expected_return_date, returned_at.as_ref());
        let rental = self.reconstruct(|rental| {
            rental.returned_at = Some(returned_at);
            rental.status = RentalStatus::Returned;
            rental.fine = Some(*assessment.amount());
            rental.updated_at = UpdatedAt::new(now);
        });
        Ok((rental, assessment))
    }

    pub fn cancel(self, now: OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        self.ensure_open("cancelled")?;
        Ok(self.reconstruct(|rental| {
            rental.status = RentalStatus::Cancelled;
            rental.updated_at = UpdatedAt::new(now);
        }))
    }

    pub fn revise(
        self,
        rent_date: Option<RentDate>,
        expected_return_date: Option<ExpectedReturnDate>,
        notes: Option<Option<Notes>>,
        now: OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError> {
        if (rent_date.is_some() || expected_return_date.is_some()) && !self.is_open() {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Rental {} is {}; its dates can no longer change",
                self.id.as_ref(),
                self.status
            )));
        }
        let next_rent = rent_date.unwrap_or(self.rent_date);
        let next_expected = expected_return_date.unwrap_or(self.expected_return_date);
        let mut violations = Violations::new();
        violations.check(
            next_expected.as_ref() >= next_rent.as_ref(),
            "return_date",
            "return date must not be before the rent date",
        );
        violations.into_result()?;

        Ok(self.reconstruct(|rental| {
            rental.rent_date = next_rent;
            rental.expected_return_date = next_expected;
            if let Some(notes) = notes {
                rental.notes = notes;
            }
            rental.updated_at = UpdatedAt::new(now);
        }))
    }

    fn ensure_open(&self, target: &str) -> error_stack::Result<(), KernelError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Rental {} is already {} and cannot be {target}",
                self.id.as_ref(),
                self.status
            )))
        }
    }
}

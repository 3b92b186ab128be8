mod detail;
mod id;
mod kind;

pub use self::{detail::*, id::*, kind::*};

use destructure::Destructure;
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{Clothing, ClothingId, CreatedAt, Notes, StockQuantity, UpdatedAt};
use crate::{KernelError, Violations};

/// Ledger entry for a change in an item's quantity on hand.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct StockMovement {
    id: StockMovementId,
    clothing_id: ClothingId,
    kind: MovementKind,
    quantity: MovementQuantity,
    previous_quantity: StockQuantity,
    new_quantity: StockQuantity,
    reason: MovementReason,
    recorded_by: RecordedBy,
    notes: Option<Notes>,
    recorded_at: CreatedAt<StockMovement>,
}

impl StockMovement {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: StockMovementId,
        clothing_id: ClothingId,
        kind: MovementKind,
        quantity: MovementQuantity,
        previous_quantity: StockQuantity,
        new_quantity: StockQuantity,
        reason: MovementReason,
        recorded_by: RecordedBy,
        notes: Option<Notes>,
        recorded_at: CreatedAt<StockMovement>,
    ) -> Self {
        Self {
            id,
            clothing_id,
            kind,
            quantity,
            previous_quantity,
            new_quantity,
            reason,
            recorded_by,
            notes,
            recorded_at,
        }
    }

    /// Builds the ledger entry for `clothing` and the item with its updated count.
    /// A movement that would leave a negative quantity is refused.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        id: StockMovementId,
        clothing: Clothing,
        kind: MovementKind,
        quantity: MovementQuantity,
        reason: MovementReason,
        recorded_by: RecordedBy,
        notes: Option<Notes>,
        now: OffsetDateTime,
    ) -> error_stack::Result<(Self, Clothing), KernelError> {
        let mut violations = Violations::new();
        violations.check(
            *quantity.as_ref() >= 1,
            "quantity",
            "quantity must be at least 1",
        );
        violations.check(
            !reason.as_ref().trim().is_empty(),
            "reason",
            "reason is required",
        );
        violations.into_result()?;

        let previous = *clothing.quantity();
        let next = kind.apply(&previous, &quantity);
        let next = i32::try_from(next)
            .ok()
            .filter(|next| *next >= 0)
            .ok_or_else(|| {
                Report::new(KernelError::Conflict).attach_printable(format!(
                    "Stock of clothing {} would drop below zero ({} on hand, {} {})",
                    clothing.id().as_ref(),
                    previous.as_ref(),
                    kind,
                    quantity.as_ref()
                ))
            })?;
        let next = StockQuantity::new(next);

        let movement = Self {
            id,
            clothing_id: clothing.id().clone(),
            kind,
            quantity,
            previous_quantity: previous,
            new_quantity: next,
            reason,
            recorded_by,
            notes,
            recorded_at: CreatedAt::new(now),
        };
        let clothing = clothing.reconstruct(|clothing| {
            clothing.quantity = next;
            clothing.updated_at = UpdatedAt::new(now);
        });
        Ok((movement, clothing))
    }
}

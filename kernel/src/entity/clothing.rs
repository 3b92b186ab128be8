mod attribute;
mod id;
mod price;
mod status;
mod stock;

pub use self::{attribute::*, id::*, price::*, status::*, stock::*};

use destructure::{Destructure, Mutation};
use time::Date;
use vodca::References;

use crate::entity::{CreatedAt, Notes, UpdatedAt};
use crate::{KernelError, Violations};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Clothing {
    id: ClothingId,
    name: ClothingName,
    kind: ClothingType,
    size: ClothingSize,
    color: ClothingColor,
    category: ClothingCategory,
    price: Price,
    status: ClothingStatus,
    quantity: StockQuantity,
    min_quantity: StockQuantity,
    last_maintenance: Option<MaintenanceDate>,
    next_maintenance: Option<MaintenanceDate>,
    notes: Option<Notes>,
    created_at: CreatedAt<Clothing>,
    updated_at: UpdatedAt<Clothing>,
}

impl Clothing {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ClothingId,
        name: ClothingName,
        kind: ClothingType,
        size: ClothingSize,
        color: ClothingColor,
        category: ClothingCategory,
        price: Price,
        status: ClothingStatus,
        quantity: StockQuantity,
        min_quantity: StockQuantity,
        last_maintenance: Option<MaintenanceDate>,
        next_maintenance: Option<MaintenanceDate>,
        notes: Option<Notes>,
        created_at: CreatedAt<Clothing>,
        updated_at: UpdatedAt<Clothing>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            size,
            color,
            category,
            price,
            status,
            quantity,
            min_quantity,
            last_maintenance,
            next_maintenance,
            notes,
            created_at,
            updated_at,
        }
    }

    /// Checks the fields a catalogue entry must carry before it is stored.
    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        let mut violations = Violations::new();
        let required = [
            ("name", self.name.as_ref()),
            ("type", self.kind.as_ref()),
            ("size", self.size.as_ref()),
            ("color", self.color.as_ref()),
            ("category", self.category.as_ref()),
        ];
        for (field, value) in required {
            violations.check(!value.trim().is_empty(), field, format!("{field} is required"));
        }
        violations.check(
            !self.price.as_ref().is_sign_negative(),
            "price",
            "price must not be negative",
        );
        violations.check(
            *self.quantity.as_ref() >= 0,
            "quantity",
            "quantity must not be negative",
        );
        violations.check(
            *self.min_quantity.as_ref() >= 0,
            "min_quantity",
            "minimum quantity must not be negative",
        );
        violations.into_result()
    }

    pub fn is_available(&self) -> bool {
        self.status == ClothingStatus::Available
    }

    pub fn is_out_of_stock(&self) -> bool {
        *self.quantity.as_ref() == 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    /// Maintenance is due on the scheduled day itself.
    pub fn is_maintenance_due(&self, today: Date) -> bool {
        self.next_maintenance
            .map(|next| *next.as_ref() <= today)
            .unwrap_or(false)
    }
}

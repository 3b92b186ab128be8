use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::entity::{MovementQuantity, StockQuantity};
use crate::KernelError;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
    Adjustment,
    Damage,
    Maintenance,
}

impl MovementKind {
    pub const ALL: [MovementKind; 5] = [
        MovementKind::In,
        MovementKind::Out,
        MovementKind::Adjustment,
        MovementKind::Damage,
        MovementKind::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "in",
            MovementKind::Out => "out",
            MovementKind::Adjustment => "adjustment",
            MovementKind::Damage => "damage",
            MovementKind::Maintenance => "maintenance",
        }
    }

    /// Quantity on hand after this movement. An adjustment sets the count outright.
    pub fn apply(&self, previous: &StockQuantity, quantity: &MovementQuantity) -> i64 {
        let previous = i64::from(*previous.as_ref());
        let quantity = i64::from(*quantity.as_ref());
        match self {
            MovementKind::In => previous + quantity,
            MovementKind::Out | MovementKind::Damage | MovementKind::Maintenance => {
                previous - quantity
            }
            MovementKind::Adjustment => quantity,
        }
    }
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Unknown stock movement kind: {s}"))
            })
    }
}

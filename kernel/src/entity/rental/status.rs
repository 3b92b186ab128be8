use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Returned,
    Overdue,
    Cancelled,
}

impl RentalStatus {
    pub const ALL: [RentalStatus; 4] = [
        RentalStatus::Active,
        RentalStatus::Returned,
        RentalStatus::Overdue,
        RentalStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Returned => "returned",
            RentalStatus::Overdue => "overdue",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    /// Items are still out with the customer.
    pub fn is_open(&self) -> bool {
        matches!(self, RentalStatus::Active | RentalStatus::Overdue)
    }
}

impl Display for RentalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Unknown rental status: {s}"))
            })
    }
}

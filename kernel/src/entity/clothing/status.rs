use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingStatus {
    Available,
    Rented,
    Washing,
    Damaged,
}

impl ClothingStatus {
    pub const ALL: [ClothingStatus; 4] = [
        ClothingStatus::Available,
        ClothingStatus::Rented,
        ClothingStatus::Washing,
        ClothingStatus::Damaged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingStatus::Available => "available",
            ClothingStatus::Rented => "rented",
            ClothingStatus::Washing => "washing",
            ClothingStatus::Damaged => "damaged",
        }
    }
}

impl Display for ClothingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingStatus {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Unknown clothing status: {s}"))
            })
    }
}

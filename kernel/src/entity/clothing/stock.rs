use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

/// Units on hand. Also used for the minimum threshold that triggers a low-stock alert.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct StockQuantity(i32);

impl StockQuantity {
    pub fn new(quantity: impl Into<i32>) -> Self {
        Self(quantity.into())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct MaintenanceDate(Date);

impl MaintenanceDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

/// Day the customer picks the items up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct RentDate(Date);

impl RentDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ExpectedReturnDate(Date);

impl ExpectedReturnDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

/// Day the items actually came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ReturnedAt(Date);

impl ReturnedAt {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

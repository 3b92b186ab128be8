use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::Price;

/// Sum of item prices captured when the rental was opened.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct TotalValue(Decimal);

impl TotalValue {
    pub fn new(value: impl Into<Decimal>) -> Self {
        Self(value.into())
    }

    pub fn of<'a>(prices: impl IntoIterator<Item = &'a Price>) -> Self {
        Self(prices.into_iter().map(|price| *price.as_ref()).sum())
    }
}

mod calendar;
mod clothing;
mod customer;
mod rental;
mod report;
mod stock;

#[cfg(test)]
pub(crate) mod memory;

pub use self::{calendar::*, clothing::*, customer::*, rental::*, report::*, stock::*};

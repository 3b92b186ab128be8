mod calendar;
mod clothing;
mod common;
mod customer;
mod rental;
mod report;
mod stock;

pub use self::{calendar::*, clothing::*, common::*, customer::*, rental::*, report::*, stock::*};

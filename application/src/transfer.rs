mod calendar;
mod clothing;
mod customer;
mod rental;
mod report;
mod stock;

pub use self::{calendar::*, clothing::*, customer::*, rental::*, report::*, stock::*};

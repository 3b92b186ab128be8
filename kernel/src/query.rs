mod clothing;
mod customer;
mod rental;
mod stock;

pub use self::{clothing::*, customer::*, rental::*, stock::*};

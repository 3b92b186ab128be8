mod calendar;
mod clothing;
mod customer;
mod rental;
mod report;
mod stock;

pub use self::{
    calendar::CalendarRouter, clothing::ClothingRouter, customer::CustomerRouter,
    rental::RentalRouter, report::ReportRouter, stock::StockRouter,
};

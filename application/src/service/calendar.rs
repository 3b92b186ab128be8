use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::prelude::entity::{derive_calendar, CalendarRange};
use kernel::KernelError;

use crate::transfer::{CalendarDayDto, GetCalendarDto};

#[async_trait::async_trait]
pub trait GetCalendarService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnRentalQuery + DependOnClock
{
    async fn get_calendar(
        &self,
        dto: GetCalendarDto,
    ) -> error_stack::Result<Vec<CalendarDayDto>, KernelError> {
        let range = CalendarRange::new(dto.from, dto.to)?;
        let mut connection = self.database_connection().transact().await?;
        let rentals = self
            .rental_query()
            .find_touching(&mut connection, range.from(), range.to())
            .await?;
        let days = derive_calendar(&range, &rentals, &self.clock().today());
        Ok(days.into_iter().map(CalendarDayDto::from).collect())
    }
}

impl<T> GetCalendarService for T where
    T: DependOnDatabaseConnection + DependOnRentalQuery + DependOnClock
{
}

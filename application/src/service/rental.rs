use std::collections::HashMap;

use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::policy::DependOnFinePolicy;
use kernel::interface::query::{
    ClothingQuery, CustomerQuery, DependOnClothingQuery, DependOnCustomerQuery,
    DependOnRentalQuery, RentalFilter, RentalQuery,
};
use kernel::interface::update::{
    ClothingModifier, DependOnClothingModifier, DependOnRentalModifier, RentalModifier,
};
use kernel::prelude::entity::{
    checked_paging, Clothing, ClothingId, ClothingStatus, CustomerId, ExpectedReturnDate, Notes,
    RentDate, Rental, RentalId, ReturnedAt, UpdatedAt,
};
use kernel::{KernelError, Violations};

use crate::transfer::{
    CancelRentalDto, CreateRentalDto, GetRentalDto, GetRentalsDto, RentalDto, ReturnRentalDto,
    UpdateRentalDto,
};

#[async_trait::async_trait]
pub trait GetRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnClock
    + DependOnFinePolicy
{
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = RentalId::new(dto.id);
        let rental = self.rental_query().find_by_id(&mut connection, &id).await?;
        let today = self.clock().today();
        Ok(rental.map(|rental| RentalDto::new(rental, self.fine_policy(), &today)))
    }

    async fn get_rentals(
        &self,
        dto: GetRentalsDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let (limit, offset) = checked_paging(dto.limit, dto.offset)?;
        let mut connection = self.database_connection().transact().await?;
        let today = self.clock().today();
        let filter = RentalFilter {
            customer_id: dto.customer_id.map(CustomerId::new),
            status: dto.status,
            rented_from: dto.from,
            rented_to: dto.to,
            limit,
            offset,
            ..RentalFilter::new(today)
        };
        let rentals = self.rental_query().find_all(&mut connection, &filter).await?;
        Ok(rentals
            .into_iter()
            .map(|rental| RentalDto::new(rental, self.fine_policy(), &today))
            .collect())
    }
}

impl<T> GetRentalService for T where
    T: DependOnDatabaseConnection + DependOnRentalQuery + DependOnClock + DependOnFinePolicy
{
}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnCustomerQuery
    + DependOnClothingQuery
    + DependOnClothingModifier
    + DependOnRentalModifier
    + DependOnClock
    + DependOnFinePolicy
{
    async fn create_rental(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut violations = Violations::new();
        violations.check(
            dto.customer_id.is_some(),
            "customer_id",
            "select a customer",
        );
        violations.check(
            !dto.clothing_ids.is_empty(),
            "clothing_ids",
            "select at least one clothing item",
        );
        violations.check(dto.rent_date.is_some(), "rent_date", "rent date is required");
        violations.check(
            dto.return_date.is_some(),
            "return_date",
            "return date is required",
        );
        violations.into_result()?;
        let (Some(customer_id), Some(rent_date), Some(return_date)) =
            (dto.customer_id, dto.rent_date, dto.return_date)
        else {
            return Err(Report::new(KernelError::Validation));
        };

        let mut connection = self.database_connection().transact().await?;
        let customer_id = CustomerId::new(customer_id);
        if self
            .customer_query()
            .find_by_id(&mut connection, &customer_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Customer {} does not exist", customer_id.as_ref())));
        }

        let ids = dto
            .clothing_ids
            .into_iter()
            .map(ClothingId::new)
            .collect::<Vec<_>>();
        let items = self
            .clothing_query()
            .find_by_ids_for_update(&mut connection, &ids)
            .await?;
        let items = in_requested_order(&ids, items)?;

        let now = self.clock().now();
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            customer_id,
            &items,
            RentDate::new(rent_date),
            ExpectedReturnDate::new(return_date),
            Notes::from_optional(dto.notes),
            now,
        )?;
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        for item in items {
            let item = item.reconstruct(|item| {
                item.status = ClothingStatus::Rented;
                item.updated_at = UpdatedAt::new(now);
            });
            self.clothing_modifier()
                .update(&mut connection, &item)
                .await?;
        }
        connection.commit().await?;

        tracing::info!(
            "Rental {} opened for customer {} with {} item(s), total {}",
            rental.id().as_ref(),
            rental.customer_id().as_ref(),
            rental.clothing_ids().len(),
            rental.total_value().as_ref()
        );
        Ok(RentalDto::new(rental, self.fine_policy(), &now.date()))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnCustomerQuery
        + DependOnClothingQuery
        + DependOnClothingModifier
        + DependOnRentalModifier
        + DependOnClock
        + DependOnFinePolicy
{
}

#[async_trait::async_trait]
pub trait UpdateRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnClock
    + DependOnFinePolicy
{
    async fn update_rental(
        &self,
        dto: UpdateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = RentalId::new(dto.id);
        let rental = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        let now = self.clock().now();
        let rental = rental.revise(
            dto.rent_date.map(RentDate::new),
            dto.return_date.map(ExpectedReturnDate::new),
            dto.notes.map(|notes| Notes::from_optional(Some(notes))),
            now,
        )?;
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        tracing::info!("Rental {} revised", rental.id().as_ref());
        Ok(RentalDto::new(rental, self.fine_policy(), &self.clock().today()))
    }
}

impl<T> UpdateRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnClock
        + DependOnFinePolicy
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnClothingQuery
    + DependOnClothingModifier
    + DependOnClock
    + DependOnFinePolicy
{
    /// Settles any fine and puts the items back on the shelf.
    async fn return_rental(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = RentalId::new(dto.id);
        let rental = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        let now = self.clock().now();
        let today = self.clock().today();
        let returned_at = ReturnedAt::new(dto.actual_return_date.unwrap_or(today));
        let (rental, assessment) = rental.settle(returned_at, self.fine_policy(), now)?;
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.release_items(&mut connection, rental.clothing_ids(), now)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "Rental {} returned {} day(s) late, fine {}",
            rental.id().as_ref(),
            assessment.days_late().as_ref(),
            assessment.amount().as_ref()
        );
        Ok(RentalDto::new(rental, self.fine_policy(), &today))
    }

    async fn cancel_rental(
        &self,
        dto: CancelRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = RentalId::new(dto.id);
        let rental = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        let now = self.clock().now();
        let rental = rental.cancel(now)?;
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.release_items(&mut connection, rental.clothing_ids(), now)
            .await?;
        connection.commit().await?;

        tracing::info!("Rental {} cancelled", rental.id().as_ref());
        Ok(RentalDto::new(rental, self.fine_policy(), &self.clock().today()))
    }

    async fn release_items(
        &self,
        connection: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        ids: &[ClothingId],
        now: time::OffsetDateTime,
    ) -> error_stack::Result<(), KernelError> {
        let items = self
            .clothing_query()
            .find_by_ids_for_update(connection, ids)
            .await?;
        for item in items {
            let item = item.reconstruct(|item| {
                item.status = ClothingStatus::Available;
                item.updated_at = UpdatedAt::new(now);
            });
            self.clothing_modifier().update(connection, &item).await?;
        }
        Ok(())
    }
}

impl<T> ReturnRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnClothingQuery
        + DependOnClothingModifier
        + DependOnClock
        + DependOnFinePolicy
{
}

/// Lines the fetched items up with the requested ids, repeating an item when
/// its id was requested twice so the rental can reject the duplicate.
fn in_requested_order(
    ids: &[ClothingId],
    items: Vec<Clothing>,
) -> error_stack::Result<Vec<Clothing>, KernelError> {
    let found = items
        .into_iter()
        .map(|item| (item.id().clone(), item))
        .collect::<HashMap<_, _>>();
    ids.iter()
        .map(|id| {
            found.get(id).cloned().ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Clothing {} does not exist", id.as_ref()))
            })
        })
        .collect()
}

fn not_found(id: &RentalId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("Rental {} does not exist", id.as_ref()))
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use kernel::prelude::entity::{ClothingId, ClothingStatus, RentalStatus};
    use kernel::{field_violations, KernelError};

    use crate::service::memory::TestModule;
    use crate::service::{
        CreateClothingService, CreateCustomerService, CreateRentalService, GetRentalService,
        ReturnRentalService, UpdateRentalService,
    };
    use crate::transfer::{
        CancelRentalDto, CreateClothingDto, CreateCustomerDto, CreateRentalDto, GetRentalDto,
        GetRentalsDto, ReturnRentalDto, UpdateRentalDto,
    };

    async fn customer(module: &TestModule) -> Uuid {
        module
            .create_customer(CreateCustomerDto {
                name: "Ana Souza".to_string(),
                cpf: "12345678909".to_string(),
                phone: "11987654321".to_string(),
                email: "ana@example.com".to_string(),
                address: "Rua das Flores, 10".to_string(),
                notes: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn item(module: &TestModule, name: &str, price: Decimal) -> Uuid {
        module
            .create_clothing(CreateClothingDto {
                name: name.to_string(),
                kind: "dress".to_string(),
                size: "M".to_string(),
                color: "black".to_string(),
                category: "formal".to_string(),
                price,
                status: None,
                quantity: None,
                min_quantity: None,
                last_maintenance: None,
                next_maintenance: None,
                notes: None,
            })
            .await
            .unwrap()
            .id
    }

    fn status_of(module: &TestModule, id: Uuid) -> ClothingStatus {
        *module.state().clothes[&ClothingId::new(id)].status()
    }

    fn rent(customer_id: Uuid, clothing_ids: Vec<Uuid>) -> CreateRentalDto {
        CreateRentalDto {
            customer_id: Some(customer_id),
            clothing_ids,
            rent_date: Some(date!(2024 - 01 - 03)),
            return_date: Some(date!(2024 - 01 - 10)),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_totals_prices_and_rents_items() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let blazer = item(&module, "Blazer", dec!(30.00)).await;

        let rental = module
            .create_rental(rent(customer, vec![gown, blazer]))
            .await
            .unwrap();
        assert_eq!(rental.total_value, dec!(80.00));
        assert_eq!(rental.status, RentalStatus::Active);
        assert_eq!(rental.clothing_ids, vec![gown, blazer]);
        assert_eq!(status_of(&module, gown), ClothingStatus::Rented);
        assert_eq!(status_of(&module, blazer), ClothingStatus::Rented);

        let stored = module
            .get_rental(GetRentalDto { id: rental.id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_value, dec!(80.00));
    }

    #[tokio::test]
    async fn return_five_days_late_charges_one_hundred() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let blazer = item(&module, "Blazer", dec!(30.00)).await;
        let rental = module
            .create_rental(rent(customer, vec![gown, blazer]))
            .await
            .unwrap();

        let returned = module
            .return_rental(ReturnRentalDto {
                id: rental.id,
                actual_return_date: Some(date!(2024 - 01 - 15)),
            })
            .await
            .unwrap();
        assert_eq!(returned.status, RentalStatus::Returned);
        assert_eq!(returned.actual_return_date, Some(date!(2024 - 01 - 15)));
        assert_eq!(returned.days_late, 5);
        assert_eq!(returned.fine, dec!(100));
        assert_eq!(status_of(&module, gown), ClothingStatus::Available);
        assert_eq!(status_of(&module, blazer), ClothingStatus::Available);
    }

    #[tokio::test]
    async fn return_on_time_is_free_and_defaults_to_today() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let rental = module.create_rental(rent(customer, vec![gown])).await.unwrap();

        let later = module.travel_to(datetime!(2024-01-10 17:00 UTC));
        let returned = later
            .return_rental(ReturnRentalDto {
                id: rental.id,
                actual_return_date: None,
            })
            .await
            .unwrap();
        assert_eq!(returned.actual_return_date, Some(date!(2024 - 01 - 10)));
        assert_eq!(returned.days_late, 0);
        assert_eq!(returned.fine, Decimal::ZERO);
    }

    #[tokio::test]
    async fn create_reports_missing_fields() {
        let module = TestModule::new();
        let report = module
            .create_rental(CreateRentalDto::default())
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
        let fields = field_violations(&report)
            .into_iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            vec!["customer_id", "clothing_ids", "rent_date", "return_date"]
        );
    }

    #[tokio::test]
    async fn create_rejects_inverted_dates() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let report = module
            .create_rental(CreateRentalDto {
                return_date: Some(date!(2024 - 01 - 01)),
                ..rent(customer, vec![gown])
            })
            .await
            .unwrap_err();
        assert_eq!(field_violations(&report)[0].field, "return_date");
        assert_eq!(status_of(&module, gown), ClothingStatus::Available);
    }

    #[tokio::test]
    async fn create_leaves_nothing_behind_when_an_item_is_taken() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let blazer = item(&module, "Blazer", dec!(30.00)).await;
        module.create_rental(rent(customer, vec![blazer])).await.unwrap();

        let report = module
            .create_rental(rent(customer, vec![gown, blazer]))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Conflict));
        assert_eq!(status_of(&module, gown), ClothingStatus::Available);
        assert_eq!(module.state().rentals.len(), 1);
    }

    #[tokio::test]
    async fn create_requires_known_customer_and_items() {
        let module = TestModule::new();
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let report = module
            .create_rental(rent(Uuid::new_v4(), vec![gown]))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));

        let customer = customer(&module).await;
        let report = module
            .create_rental(rent(customer, vec![gown, Uuid::new_v4()]))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));
        assert!(module.state().rentals.is_empty());
    }

    #[tokio::test]
    async fn closed_rentals_cannot_be_closed_again() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let rental = module.create_rental(rent(customer, vec![gown])).await.unwrap();
        module
            .return_rental(ReturnRentalDto {
                id: rental.id,
                actual_return_date: Some(date!(2024 - 01 - 12)),
            })
            .await
            .unwrap();

        let report = module
            .return_rental(ReturnRentalDto {
                id: rental.id,
                actual_return_date: Some(date!(2024 - 01 - 20)),
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Conflict));
        let report = module
            .cancel_rental(CancelRentalDto { id: rental.id })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Conflict));

        let stored = module
            .get_rental(GetRentalDto { id: rental.id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RentalStatus::Returned);
        assert_eq!(stored.fine, dec!(40));
    }

    #[tokio::test]
    async fn cancel_frees_items_without_fine() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let rental = module.create_rental(rent(customer, vec![gown])).await.unwrap();

        let late = module.travel_to(datetime!(2024-01-20 09:00 UTC));
        let cancelled = late
            .cancel_rental(CancelRentalDto { id: rental.id })
            .await
            .unwrap();
        assert_eq!(cancelled.status, RentalStatus::Cancelled);
        assert_eq!(cancelled.fine, Decimal::ZERO);
        assert_eq!(cancelled.actual_return_date, None);
        assert_eq!(status_of(&module, gown), ClothingStatus::Available);
    }

    #[tokio::test]
    async fn overdue_is_derived_when_reading() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let blazer = item(&module, "Blazer", dec!(30.00)).await;
        let late = module.create_rental(rent(customer, vec![gown])).await.unwrap();
        module
            .create_rental(CreateRentalDto {
                return_date: Some(date!(2024 - 01 - 20)),
                ..rent(customer, vec![blazer])
            })
            .await
            .unwrap();

        let later = module.travel_to(datetime!(2024-01-13 12:00 UTC));
        let rental = later
            .get_rental(GetRentalDto { id: late.id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rental.status, RentalStatus::Overdue);
        assert_eq!(rental.days_late, 3);
        assert_eq!(rental.fine, dec!(60));
        assert_eq!(
            *module.state().rentals.values().next().unwrap().status(),
            RentalStatus::Active
        );

        let overdue = later
            .get_rentals(GetRentalsDto {
                status: Some(RentalStatus::Overdue),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, late.id);

        let active = later
            .get_rentals(GetRentalsDto {
                status: Some(RentalStatus::Active),
                customer_id: Some(customer),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_ne!(active[0].id, late.id);
    }

    #[tokio::test]
    async fn update_revalidates_dates() {
        let module = TestModule::new();
        let customer = customer(&module).await;
        let gown = item(&module, "Gown", dec!(50.00)).await;
        let rental = module.create_rental(rent(customer, vec![gown])).await.unwrap();

        let extended = module
            .update_rental(UpdateRentalDto {
                id: rental.id,
                return_date: Some(date!(2024 - 01 - 14)),
                notes: Some("customer asked for more days".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(extended.expected_return_date, date!(2024 - 01 - 14));
        assert_eq!(extended.total_value, dec!(50.00));
        assert_eq!(
            extended.notes.as_deref(),
            Some("customer asked for more days")
        );

        let report = module
            .update_rental(UpdateRentalDto {
                id: rental.id,
                rent_date: Some(date!(2024 - 01 - 15)),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
    }

    #[tokio::test]
    async fn listing_rejects_negative_paging() {
        let module = TestModule::new();
        let report = module
            .get_rentals(GetRentalsDto {
                limit: Some(-1),
                offset: Some(-1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
        let fields = field_violations(&report)
            .into_iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["limit", "offset"]);
    }
}

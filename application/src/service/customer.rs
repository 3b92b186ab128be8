use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerFilter, CustomerQuery, DependOnCustomerQuery, DependOnRentalQuery, RentalQuery,
};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{
    checked_paging, Address, Cpf, CreatedAt, Customer, CustomerId, CustomerName, Email, Notes,
    Phone, UpdatedAt,
};
use kernel::KernelError;

use crate::transfer::{
    CreateCustomerDto, CustomerDto, DeleteCustomerDto, GetCustomerDto, GetCustomersDto,
    UpdateCustomerDto,
};

#[async_trait::async_trait]
pub trait GetCustomerService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnCustomerQuery
{
    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<Option<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = CustomerId::new(dto.id);
        let customer = self.customer_query().find_by_id(&mut connection, &id).await?;
        Ok(customer.map(CustomerDto::from))
    }

    async fn get_customers(
        &self,
        dto: GetCustomersDto,
    ) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        let (limit, offset) = checked_paging(dto.limit, dto.offset)?;
        let mut connection = self.database_connection().transact().await?;
        let filter = CustomerFilter {
            search: dto.q.filter(|q| !q.trim().is_empty()),
            cpf: dto.cpf,
            limit: Some(limit.unwrap_or_default()),
            offset,
        };
        let customers = self.customer_query().find_all(&mut connection, &filter).await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }
}

impl<T> GetCustomerService for T where T: DependOnDatabaseConnection + DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait CreateCustomerService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnCustomerModifier + DependOnClock
{
    async fn create_customer(
        &self,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let now = self.clock().now();
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(dto.name.trim()),
            Cpf::new(dto.cpf.trim()),
            Phone::new(dto.phone.trim()),
            Email::new(dto.email.trim()),
            Address::new(dto.address.trim()),
            Notes::from_optional(dto.notes),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        customer.validate()?;

        let mut connection = self.database_connection().transact().await?;
        self.customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        tracing::info!("Customer {} registered", customer.id().as_ref());
        Ok(CustomerDto::from(customer))
    }
}

impl<T> CreateCustomerService for T where
    T: DependOnDatabaseConnection + DependOnCustomerModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait UpdateCustomerService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnClock
{
    async fn update_customer(
        &self,
        dto: UpdateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = CustomerId::new(dto.id);
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        let mut customer = customer.into_destruct();
        if let Some(name) = dto.name {
            customer.name = CustomerName::new(name.trim());
        }
        if let Some(cpf) = dto.cpf {
            customer.cpf = Cpf::new(cpf.trim());
        }
        if let Some(phone) = dto.phone {
            customer.phone = Phone::new(phone.trim());
        }
        if let Some(email) = dto.email {
            customer.email = Email::new(email.trim());
        }
        if let Some(address) = dto.address {
            customer.address = Address::new(address.trim());
        }
        if let Some(notes) = dto.notes {
            customer.notes = Notes::from_optional(Some(notes));
        }
        customer.updated_at = UpdatedAt::new(self.clock().now());
        let customer = customer.freeze();
        customer.validate()?;

        self.customer_modifier()
            .update(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        tracing::info!("Customer {} updated", customer.id().as_ref());
        Ok(CustomerDto::from(customer))
    }
}

impl<T> UpdateCustomerService for T where
    T: DependOnDatabaseConnection
        + DependOnCustomerQuery
        + DependOnCustomerModifier
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait DeleteCustomerService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnRentalQuery
{
    /// Customers with rentals still out (active or overdue) are kept.
    async fn delete_customer(&self, dto: DeleteCustomerDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = CustomerId::new(dto.id);
        if self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(&id));
        }

        let open = self
            .rental_query()
            .count_open_by_customer_id(&mut connection, &id)
            .await?;
        if open > 0 {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Customer {} still has {open} open rental(s)",
                id.as_ref()
            )));
        }

        self.customer_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!("Customer {} deleted", id.as_ref());
        Ok(())
    }
}

impl<T> DeleteCustomerService for T where
    T: DependOnDatabaseConnection
        + DependOnCustomerQuery
        + DependOnCustomerModifier
        + DependOnRentalQuery
{
}

fn not_found(id: &CustomerId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("Customer {} does not exist", id.as_ref()))
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use kernel::{field_violations, KernelError};

    use crate::service::memory::TestModule;
    use crate::service::{
        CreateClothingService, CreateCustomerService, CreateRentalService, DeleteCustomerService,
        GetCustomerService, ReturnRentalService, UpdateCustomerService,
    };
    use crate::transfer::{
        CreateClothingDto, CreateCustomerDto, CreateRentalDto, DeleteCustomerDto,
        GetCustomersDto, ReturnRentalDto, UpdateCustomerDto,
    };

    fn ana() -> CreateCustomerDto {
        CreateCustomerDto {
            name: "Ana Souza".to_string(),
            cpf: "123.456.789-09".to_string(),
            phone: "(11) 98765-4321".to_string(),
            email: "ana@example.com".to_string(),
            address: "Rua das Flores, 10".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_reports_every_bad_field() {
        let module = TestModule::new();
        let report = module
            .create_customer(CreateCustomerDto {
                name: " ".to_string(),
                email: "not-an-email".to_string(),
                ..ana()
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
        let fields = field_violations(&report)
            .into_iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["name", "email"]);
    }

    #[tokio::test]
    async fn search_and_update() {
        let module = TestModule::new();
        let ana = module.create_customer(ana()).await.unwrap();
        module
            .create_customer(CreateCustomerDto {
                name: "Bruno Lima".to_string(),
                cpf: "98765432100".to_string(),
                email: "bruno@example.com".to_string(),
                ..self::ana()
            })
            .await
            .unwrap();

        let found = module
            .get_customers(GetCustomersDto {
                q: Some("bruno".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bruno Lima");

        let by_cpf = module
            .get_customers(GetCustomersDto {
                cpf: Some("123.456.789-09".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_cpf[0].id, ana.id);

        let updated = module
            .update_customer(UpdateCustomerDto {
                id: ana.id,
                phone: Some("(11) 91234-5678".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.phone, "(11) 91234-5678");
        assert_eq!(updated.email, "ana@example.com");
    }

    #[tokio::test]
    async fn delete_is_blocked_while_rentals_are_open() {
        let module = TestModule::new();
        let customer = module.create_customer(ana()).await.unwrap();
        let dress = module
            .create_clothing(CreateClothingDto {
                name: "Cocktail dress".to_string(),
                kind: "dress".to_string(),
                size: "M".to_string(),
                color: "red".to_string(),
                category: "party".to_string(),
                price: dec!(45.00),
                status: None,
                quantity: None,
                min_quantity: None,
                last_maintenance: None,
                next_maintenance: None,
                notes: None,
            })
            .await
            .unwrap();
        let rental = module
            .create_rental(CreateRentalDto {
                customer_id: Some(customer.id),
                clothing_ids: vec![dress.id],
                rent_date: Some(date!(2024 - 01 - 03)),
                return_date: Some(date!(2024 - 01 - 10)),
                notes: None,
            })
            .await
            .unwrap();

        let report = module
            .delete_customer(DeleteCustomerDto { id: customer.id })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Conflict));
        assert!(module
            .get_customer(crate::transfer::GetCustomerDto { id: customer.id })
            .await
            .unwrap()
            .is_some());

        module
            .return_rental(ReturnRentalDto {
                id: rental.id,
                actual_return_date: Some(date!(2024 - 01 - 10)),
            })
            .await
            .unwrap();
        module
            .delete_customer(DeleteCustomerDto { id: customer.id })
            .await
            .unwrap();
        assert!(module.state().customers.is_empty());
    }

    #[tokio::test]
    async fn negative_offset_is_a_field_error() {
        let module = TestModule::new();
        let report = module
            .get_customers(GetCustomersDto {
                offset: Some(-10),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
        let fields = field_violations(&report)
            .into_iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["offset"]);
    }
}

use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{CustomerFilter, CustomerQuery};
use kernel::interface::update::CustomerModifier;
use kernel::prelude::entity::{
    Address, Cpf, CreatedAt, Customer, CustomerId, CustomerName, Email, Notes, Phone, UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::{like_pattern, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &CustomerFilter,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        PgCustomerInternal::find_all(con, filter).await
    }
}

#[async_trait::async_trait]
impl CustomerModifier for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::create(con, customer).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::update(con, customer).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::delete(con, customer_id).await
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    cpf: String,
    phone: String,
    email: String,
    address: String,
    notes: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(value.id),
            CustomerName::new(value.name),
            Cpf::new(value.cpf),
            Phone::new(value.phone),
            Email::new(value.email),
            Address::new(value.address),
            value.notes.map(Notes::new),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        )
    }
}

pub(in crate::database) struct PgCustomerInternal;

impl PgCustomerInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, name, cpf, phone, email, address, notes, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &CustomerFilter,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, name, cpf, phone, email, address, notes, created_at, updated_at
            FROM customers
            WHERE ($1::text IS NULL OR name ILIKE $1 OR cpf ILIKE $1 OR email ILIKE $1)
              AND ($2::text IS NULL OR cpf = $2)
            ORDER BY name, created_at
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.search.as_deref().map(like_pattern))
        .bind(filter.cpf.as_deref())
        .bind(filter.limit.as_ref().map(|limit| i64::from(*limit.as_ref())))
        .bind(i64::from(*filter.offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create(con: &mut PgConnection, customer: &Customer) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, cpf, phone, email, address, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.cpf().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.email().as_ref())
        .bind(customer.address().as_ref())
        .bind(customer.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(customer.created_at().as_ref())
        .bind(customer.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, customer: &Customer) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, cpf = $3, phone = $4, email = $5, address = $6, notes = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.cpf().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.email().as_ref())
        .bind(customer.address().as_ref())
        .bind(customer.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(customer.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, customer_id: &CustomerId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::{RentalFilter, RentalQuery};
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    ClothingId, CreatedAt, CustomerId, ExpectedReturnDate, FineAmount, Notes, Rental, RentalId,
    RentalStatus, RentDate, ReturnedAt, TotalValue, UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id_for_update(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &RentalFilter,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con, filter).await
    }

    async fn find_touching(
        &self,
        con: &mut PostgresTransaction,
        from: &Date,
        to: &Date,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_touching(con, from, to).await
    }

    async fn count_open_by_customer_id(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<i64, KernelError> {
        PgRentalInternal::count_open_by_customer_id(con, customer_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::update(con, rental).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    customer_id: Uuid,
    clothing_ids: Vec<Uuid>,
    rent_date: Date,
    expected_return_date: Date,
    actual_return_date: Option<Date>,
    total_value: Decimal,
    status: String,
    fine: Option<Decimal>,
    notes: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<RentalRow> for Rental {
    type Error = Report<KernelError>;
    fn try_from(value: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental::new(
            RentalId::new(value.id),
            CustomerId::new(value.customer_id),
            value.clothing_ids.into_iter().map(ClothingId::new).collect(),
            RentDate::new(value.rent_date),
            ExpectedReturnDate::new(value.expected_return_date),
            value.actual_return_date.map(ReturnedAt::new),
            TotalValue::new(value.total_value),
            value.status.parse::<RentalStatus>()?,
            value.fine.map(FineAmount::new),
            value.notes.map(Notes::new),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        ))
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.customer_id,
                   ARRAY(SELECT i.clothing_id FROM rental_items i WHERE i.rental_id = r.id ORDER BY i.position) AS clothing_ids,
                   r.rent_date, r.expected_return_date, r.actual_return_date, r.total_value,
                   r.status, r.fine, r.notes, r.created_at, r.updated_at
            FROM rentals r
            WHERE r.id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Rental::try_from).transpose()
    }

    async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.customer_id,
                   ARRAY(SELECT i.clothing_id FROM rental_items i WHERE i.rental_id = r.id ORDER BY i.position) AS clothing_ids,
                   r.rent_date, r.expected_return_date, r.actual_return_date, r.total_value,
                   r.status, r.fine, r.notes, r.created_at, r.updated_at
            FROM rentals r
            WHERE r.id = $1
            FOR UPDATE OF r
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Rental::try_from).transpose()
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &RentalFilter,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.customer_id,
                   ARRAY(SELECT i.clothing_id FROM rental_items i WHERE i.rental_id = r.id ORDER BY i.position) AS clothing_ids,
                   r.rent_date, r.expected_return_date, r.actual_return_date, r.total_value,
                   r.status, r.fine, r.notes, r.created_at, r.updated_at
            FROM rentals r
            WHERE ($1::uuid IS NULL OR r.customer_id = $1)
              AND ($2::date IS NULL OR r.rent_date >= $2)
              AND ($3::date IS NULL OR r.rent_date <= $3)
              AND ($4::text IS NULL OR
                   CASE WHEN r.status = 'active' AND r.expected_return_date < $5 THEN 'overdue'
                        ELSE r.status END = $4)
            ORDER BY r.rent_date DESC, r.created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filter.customer_id.as_ref().map(AsRef::<Uuid>::as_ref))
        .bind(filter.rented_from)
        .bind(filter.rented_to)
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.today)
        .bind(filter.limit.as_ref().map(|limit| i64::from(*limit.as_ref())))
        .bind(i64::from(*filter.offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn find_touching(
        con: &mut PgConnection,
        from: &Date,
        to: &Date,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT r.id, r.customer_id,
                   ARRAY(SELECT i.clothing_id FROM rental_items i WHERE i.rental_id = r.id ORDER BY i.position) AS clothing_ids,
                   r.rent_date, r.expected_return_date, r.actual_return_date, r.total_value,
                   r.status, r.fine, r.notes, r.created_at, r.updated_at
            FROM rentals r
            WHERE r.rent_date BETWEEN $1 AND $2
               OR r.expected_return_date BETWEEN $1 AND $2
            ORDER BY r.rent_date, r.created_at
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn count_open_by_customer_id(
        con: &mut PgConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<i64, KernelError> {
        // language=postgresql
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM rentals
            WHERE customer_id = $1 AND status = 'active'
            "#,
        )
        .bind(customer_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO rentals (id, customer_id, rent_date, expected_return_date, actual_return_date,
                                 total_value, status, fine, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.customer_id().as_ref())
        .bind(rental.rent_date().as_ref())
        .bind(rental.expected_return_date().as_ref())
        .bind(rental.returned_at().map(Date::from))
        .bind(rental.total_value().as_ref())
        .bind(rental.status().as_str())
        .bind(rental.fine().map(Decimal::from))
        .bind(rental.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(rental.created_at().as_ref())
        .bind(rental.updated_at().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;

        let clothing_ids = rental
            .clothing_ids()
            .iter()
            .map(|id| *id.as_ref())
            .collect::<Vec<Uuid>>();
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO rental_items (rental_id, position, clothing_id)
            SELECT $1, item.position::integer, item.clothing_id
            FROM UNNEST($2::uuid[]) WITH ORDINALITY AS item(clothing_id, position)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(clothing_ids)
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!("Stored rental {} with {} items", rental.id().as_ref(), rental.clothing_ids().len());
        Ok(())
    }

    async fn update(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE rentals
            SET rent_date = $2, expected_return_date = $3, actual_return_date = $4,
                status = $5, fine = $6, notes = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.rent_date().as_ref())
        .bind(rental.expected_return_date().as_ref())
        .bind(rental.returned_at().map(Date::from))
        .bind(rental.status().as_str())
        .bind(rental.fine().map(Decimal::from))
        .bind(rental.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(rental.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{RentalFilter, RentalQuery};
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{
        ClothingId, CreatedAt, CustomerId, ExpectedReturnDate, Rental, RentalId, RentalStatus,
        RentDate, TotalValue, UpdatedAt,
    };
    use kernel::KernelError;

    use crate::database::postgres::rental::PostgresRentalRepository;
    use crate::database::postgres::PostgresDatabase;
    use crate::error::ConvertError;

    fn rental(customer_id: &CustomerId, items: Vec<ClothingId>) -> Rental {
        let now = datetime!(2024-01-01 09:00 UTC);
        Rental::new(
            RentalId::new(Uuid::new_v4()),
            customer_id.clone(),
            items,
            RentDate::new(date!(2024 - 01 - 01)),
            ExpectedReturnDate::new(date!(2024 - 01 - 05)),
            None,
            TotalValue::new(dec!(80.00)),
            RentalStatus::Active,
            None,
            None,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn items_keep_their_order() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let customer_id = CustomerId::new(Uuid::new_v4());
        let items = vec![
            ClothingId::new(Uuid::new_v4()),
            ClothingId::new(Uuid::new_v4()),
            ClothingId::new(Uuid::new_v4()),
        ];
        let rental = rental(&customer_id, items);
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let found = PostgresRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?;
        assert_eq!(found, Some(rental));
        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn overdue_is_filtered_by_date() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let customer_id = CustomerId::new(Uuid::new_v4());
        let rental = rental(&customer_id, vec![ClothingId::new(Uuid::new_v4())]);
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let mut filter = RentalFilter::new(date!(2024 - 01 - 06));
        filter.customer_id = Some(customer_id.clone());
        filter.status = Some(RentalStatus::Overdue);
        let overdue = PostgresRentalRepository.find_all(&mut con, &filter).await?;
        assert_eq!(overdue, vec![rental.clone()]);

        filter.today = date!(2024 - 01 - 05);
        let overdue = PostgresRentalRepository.find_all(&mut con, &filter).await?;
        assert!(overdue.is_empty());

        let open = PostgresRentalRepository
            .count_open_by_customer_id(&mut con, &customer_id)
            .await?;
        assert_eq!(open, 1);

        let touching = PostgresRentalRepository
            .find_touching(&mut con, &date!(2024 - 01 - 05), &date!(2024 - 01 - 31))
            .await?;
        assert!(touching.contains(&rental));

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn locked_rental_blocks_a_second_writer() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let rental = rental(
            &CustomerId::new(Uuid::new_v4()),
            vec![ClothingId::new(Uuid::new_v4())],
        );
        let mut seed = db.transact().await?;
        PostgresRentalRepository.create(&mut seed, &rental).await?;
        seed.commit().await?;

        let mut holder = db.transact().await?;
        let locked = PostgresRentalRepository
            .find_by_id_for_update(&mut holder, rental.id())
            .await?;
        assert_eq!(locked.as_ref(), Some(&rental));

        let mut waiter = db.transact().await?;
        // language=postgresql
        sqlx::query("SET LOCAL lock_timeout = '200ms'")
            .execute(&mut *waiter)
            .await
            .convert_error()?;
        let plain = PostgresRentalRepository
            .find_by_id(&mut waiter, rental.id())
            .await?;
        assert!(plain.is_some());
        let blocked = PostgresRentalRepository
            .find_by_id_for_update(&mut waiter, rental.id())
            .await;
        assert!(blocked.is_err());
        waiter.roll_back().await?;
        holder.roll_back().await?;

        let mut cleanup = db.transact().await?;
        // language=postgresql
        sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(rental.id().as_ref())
            .execute(&mut *cleanup)
            .await
            .convert_error()?;
        cleanup.commit().await?;
        Ok(())
    }
}

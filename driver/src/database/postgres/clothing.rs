use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::{ClothingFilter, ClothingQuery};
use kernel::interface::update::ClothingModifier;
use kernel::prelude::entity::{
    Clothing, ClothingCategory, ClothingColor, ClothingId, ClothingName, ClothingSize,
    ClothingStatus, ClothingType, CreatedAt, MaintenanceDate, Notes, Price, StockQuantity,
    UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::{like_pattern, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresClothingRepository;

#[async_trait::async_trait]
impl ClothingQuery for PostgresClothingRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ClothingId,
    ) -> error_stack::Result<Option<Clothing>, KernelError> {
        PgClothingInternal::find_by_id(con, id).await
    }

    async fn find_by_ids_for_update(
        &self,
        con: &mut PostgresTransaction,
        ids: &[ClothingId],
    ) -> error_stack::Result<Vec<Clothing>, KernelError> {
        PgClothingInternal::find_by_ids_for_update(con, ids).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &ClothingFilter,
    ) -> error_stack::Result<Vec<Clothing>, KernelError> {
        PgClothingInternal::find_all(con, filter).await
    }
}

#[async_trait::async_trait]
impl ClothingModifier for PostgresClothingRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        clothing: &Clothing,
    ) -> error_stack::Result<(), KernelError> {
        PgClothingInternal::create(con, clothing).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        clothing: &Clothing,
    ) -> error_stack::Result<(), KernelError> {
        PgClothingInternal::update(con, clothing).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        clothing_id: &ClothingId,
    ) -> error_stack::Result<(), KernelError> {
        PgClothingInternal::delete(con, clothing_id).await
    }
}

#[derive(sqlx::FromRow)]
struct ClothingRow {
    id: Uuid,
    name: String,
    kind: String,
    size: String,
    color: String,
    category: String,
    price: Decimal,
    status: String,
    quantity: i32,
    min_quantity: i32,
    last_maintenance: Option<Date>,
    next_maintenance: Option<Date>,
    notes: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ClothingRow> for Clothing {
    type Error = Report<KernelError>;
    fn try_from(value: ClothingRow) -> Result<Self, Self::Error> {
        Ok(Clothing::new(
            ClothingId::new(value.id),
            ClothingName::new(value.name),
            ClothingType::new(value.kind),
            ClothingSize::new(value.size),
            ClothingColor::new(value.color),
            ClothingCategory::new(value.category),
            Price::new(value.price),
            value.status.parse::<ClothingStatus>()?,
            StockQuantity::new(value.quantity),
            StockQuantity::new(value.min_quantity),
            value.last_maintenance.map(MaintenanceDate::new),
            value.next_maintenance.map(MaintenanceDate::new),
            value.notes.map(Notes::new),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        ))
    }
}

pub(in crate::database) struct PgClothingInternal;

impl PgClothingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ClothingId,
    ) -> error_stack::Result<Option<Clothing>, KernelError> {
        let row = sqlx::query_as::<_, ClothingRow>(
            // language=postgresql
            r#"
            SELECT id, name, kind, size, color, category, price, status, quantity, min_quantity,
                   last_maintenance, next_maintenance, notes, created_at, updated_at
            FROM clothes
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Clothing::try_from).transpose()
    }

    async fn find_by_ids_for_update(
        con: &mut PgConnection,
        ids: &[ClothingId],
    ) -> error_stack::Result<Vec<Clothing>, KernelError> {
        let ids = ids.iter().map(|id| *id.as_ref()).collect::<Vec<Uuid>>();
        let rows = sqlx::query_as::<_, ClothingRow>(
            // language=postgresql
            r#"
            SELECT id, name, kind, size, color, category, price, status, quantity, min_quantity,
                   last_maintenance, next_maintenance, notes, created_at, updated_at
            FROM clothes
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(ids)
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Clothing::try_from).collect()
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &ClothingFilter,
    ) -> error_stack::Result<Vec<Clothing>, KernelError> {
        let rows = sqlx::query_as::<_, ClothingRow>(
            // language=postgresql
            r#"
            SELECT id, name, kind, size, color, category, price, status, quantity, min_quantity,
                   last_maintenance, next_maintenance, notes, created_at, updated_at
            FROM clothes
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR kind ILIKE $2 OR color ILIKE $2)
            ORDER BY name, created_at
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.search.as_deref().map(like_pattern))
        .bind(filter.limit.as_ref().map(|limit| i64::from(*limit.as_ref())))
        .bind(i64::from(*filter.offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Clothing::try_from).collect()
    }

    async fn create(con: &mut PgConnection, clothing: &Clothing) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO clothes (id, name, kind, size, color, category, price, status, quantity,
                                 min_quantity, last_maintenance, next_maintenance, notes,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(clothing.id().as_ref())
        .bind(clothing.name().as_ref())
        .bind(clothing.kind().as_ref())
        .bind(clothing.size().as_ref())
        .bind(clothing.color().as_ref())
        .bind(clothing.category().as_ref())
        .bind(clothing.price().as_ref())
        .bind(clothing.status().as_str())
        .bind(clothing.quantity().as_ref())
        .bind(clothing.min_quantity().as_ref())
        .bind(clothing.last_maintenance().map(Date::from))
        .bind(clothing.next_maintenance().map(Date::from))
        .bind(clothing.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(clothing.created_at().as_ref())
        .bind(clothing.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, clothing: &Clothing) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE clothes
            SET name = $2, kind = $3, size = $4, color = $5, category = $6, price = $7,
                status = $8, quantity = $9, min_quantity = $10, last_maintenance = $11,
                next_maintenance = $12, notes = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(clothing.id().as_ref())
        .bind(clothing.name().as_ref())
        .bind(clothing.kind().as_ref())
        .bind(clothing.size().as_ref())
        .bind(clothing.color().as_ref())
        .bind(clothing.category().as_ref())
        .bind(clothing.price().as_ref())
        .bind(clothing.status().as_str())
        .bind(clothing.quantity().as_ref())
        .bind(clothing.min_quantity().as_ref())
        .bind(clothing.last_maintenance().map(Date::from))
        .bind(clothing.next_maintenance().map(Date::from))
        .bind(clothing.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(clothing.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, clothing_id: &ClothingId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM clothes
            WHERE id = $1
            "#,
        )
        .bind(clothing_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

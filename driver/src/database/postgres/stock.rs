use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::StockMovementQuery;
use kernel::interface::update::StockMovementModifier;
use kernel::prelude::entity::{
    ClothingId, CreatedAt, MovementKind, MovementQuantity, MovementReason, Notes, RecordedBy,
    StockMovement, StockMovementId, StockQuantity,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresStockMovementRepository;

#[async_trait::async_trait]
impl StockMovementQuery for PostgresStockMovementRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        clothing_id: Option<&ClothingId>,
    ) -> error_stack::Result<Vec<StockMovement>, KernelError> {
        PgStockMovementInternal::find_all(con, clothing_id).await
    }
}

#[async_trait::async_trait]
impl StockMovementModifier for PostgresStockMovementRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        movement: &StockMovement,
    ) -> error_stack::Result<(), KernelError> {
        PgStockMovementInternal::create(con, movement).await
    }
}

#[derive(sqlx::FromRow)]
struct StockMovementRow {
    id: Uuid,
    clothing_id: Uuid,
    kind: String,
    quantity: i32,
    previous_quantity: i32,
    new_quantity: i32,
    reason: String,
    recorded_by: String,
    notes: Option<String>,
    recorded_at: OffsetDateTime,
}

impl TryFrom<StockMovementRow> for StockMovement {
    type Error = Report<KernelError>;
    fn try_from(value: StockMovementRow) -> Result<Self, Self::Error> {
        Ok(StockMovement::new(
            StockMovementId::new(value.id),
            ClothingId::new(value.clothing_id),
            value.kind.parse::<MovementKind>()?,
            MovementQuantity::new(value.quantity),
            StockQuantity::new(value.previous_quantity),
            StockQuantity::new(value.new_quantity),
            MovementReason::new(value.reason),
            RecordedBy::new(value.recorded_by),
            value.notes.map(Notes::new),
            CreatedAt::new(value.recorded_at),
        ))
    }
}

pub(in crate::database) struct PgStockMovementInternal;

impl PgStockMovementInternal {
    async fn find_all(
        con: &mut PgConnection,
        clothing_id: Option<&ClothingId>,
    ) -> error_stack::Result<Vec<StockMovement>, KernelError> {
        let rows = sqlx::query_as::<_, StockMovementRow>(
            // language=postgresql
            r#"
            SELECT id, clothing_id, kind, quantity, previous_quantity, new_quantity,
                   reason, recorded_by, notes, recorded_at
            FROM stock_movements
            WHERE $1::uuid IS NULL OR clothing_id = $1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(clothing_id.map(AsRef::<Uuid>::as_ref))
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(StockMovement::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        movement: &StockMovement,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO stock_movements (id, clothing_id, kind, quantity, previous_quantity,
                                         new_quantity, reason, recorded_by, notes, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(movement.id().as_ref())
        .bind(movement.clothing_id().as_ref())
        .bind(movement.kind().as_str())
        .bind(movement.quantity().as_ref())
        .bind(movement.previous_quantity().as_ref())
        .bind(movement.new_quantity().as_ref())
        .bind(movement.reason().as_ref())
        .bind(movement.recorded_by().as_ref())
        .bind(movement.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(movement.recorded_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(
            "Recorded {} movement for clothing {}",
            movement.kind(),
            movement.clothing_id().as_ref()
        );
        Ok(())
    }
}

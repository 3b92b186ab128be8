use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    ClothingFilter, ClothingQuery, DependOnClothingQuery, DependOnStockMovementQuery,
    StockMovementQuery,
};
use kernel::interface::update::{
    ClothingModifier, DependOnClothingModifier, DependOnStockMovementModifier,
    StockMovementModifier,
};
use kernel::prelude::entity::{
    ClothingId, MovementQuantity, MovementReason, Notes, RecordedBy, StockAlerts, StockMovement,
    StockMovementId,
};
use kernel::KernelError;

use crate::transfer::{
    CreateStockMovementDto, GetStockMovementsDto, StockAlertsDto, StockMovementDto,
};

const UNKNOWN_RECORDER: &str = "system";

#[async_trait::async_trait]
pub trait GetStockMovementsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnStockMovementQuery
{
    async fn get_stock_movements(
        &self,
        dto: GetStockMovementsDto,
    ) -> error_stack::Result<Vec<StockMovementDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let clothing_id = dto.clothing_id.map(ClothingId::new);
        let movements = self
            .stock_movement_query()
            .find_all(&mut connection, clothing_id.as_ref())
            .await?;
        Ok(movements.into_iter().map(StockMovementDto::from).collect())
    }
}

impl<T> GetStockMovementsService for T where
    T: DependOnDatabaseConnection + DependOnStockMovementQuery
{
}

#[async_trait::async_trait]
pub trait RecordStockMovementService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClothingQuery
    + DependOnClothingModifier
    + DependOnStockMovementModifier
    + DependOnClock
{
    async fn record_stock_movement(
        &self,
        dto: CreateStockMovementDto,
    ) -> error_stack::Result<StockMovementDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let clothing_id = ClothingId::new(dto.clothing_id);
        let clothing = self
            .clothing_query()
            .find_by_ids_for_update(&mut connection, std::slice::from_ref(&clothing_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!(
                    "Clothing {} does not exist",
                    clothing_id.as_ref()
                ))
            })?;

        let recorded_by = dto
            .recorded_by
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_RECORDER.to_string());
        let (movement, clothing) = StockMovement::record(
            StockMovementId::new(Uuid::new_v4()),
            clothing,
            dto.kind,
            MovementQuantity::new(dto.quantity),
            MovementReason::new(dto.reason.trim()),
            RecordedBy::new(recorded_by),
            Notes::from_optional(dto.notes),
            self.clock().now(),
        )?;
        self.stock_movement_modifier()
            .create(&mut connection, &movement)
            .await?;
        self.clothing_modifier()
            .update(&mut connection, &clothing)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "Stock of clothing {} moved {} -> {} ({})",
            clothing.id().as_ref(),
            movement.previous_quantity().as_ref(),
            movement.new_quantity().as_ref(),
            movement.kind()
        );
        Ok(StockMovementDto::from(movement))
    }
}

impl<T> RecordStockMovementService for T where
    T: DependOnDatabaseConnection
        + DependOnClothingQuery
        + DependOnClothingModifier
        + DependOnStockMovementModifier
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait GetStockAlertsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnClothingQuery + DependOnClock
{
    async fn get_stock_alerts(&self) -> error_stack::Result<StockAlertsDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let clothes = self
            .clothing_query()
            .find_all(&mut connection, &ClothingFilter::default())
            .await?;
        let today = self.clock().today();
        Ok(StockAlertsDto::new(StockAlerts::of(clothes, &today), today))
    }
}

impl<T> GetStockAlertsService for T where
    T: DependOnDatabaseConnection + DependOnClothingQuery + DependOnClock
{
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::date;
    use uuid::Uuid;

    use kernel::prelude::entity::{ClothingId, MovementKind};
    use kernel::{field_violations, KernelError};

    use crate::service::memory::TestModule;
    use crate::service::{
        CreateClothingService, GetStockAlertsService, GetStockMovementsService,
        RecordStockMovementService,
    };
    use crate::transfer::{CreateClothingDto, CreateStockMovementDto, GetStockMovementsDto};

    async fn shirt(module: &TestModule, quantity: i32, min_quantity: i32) -> Uuid {
        module
            .create_clothing(CreateClothingDto {
                name: "Dress shirt".to_string(),
                kind: "shirt".to_string(),
                size: "L".to_string(),
                color: "white".to_string(),
                category: "formal".to_string(),
                price: dec!(25.00),
                status: None,
                quantity: Some(quantity),
                min_quantity: Some(min_quantity),
                last_maintenance: None,
                next_maintenance: Some(date!(2024 - 01 - 03)),
                notes: None,
            })
            .await
            .unwrap()
            .id
    }

    fn movement(clothing_id: Uuid, kind: MovementKind, quantity: i32) -> CreateStockMovementDto {
        CreateStockMovementDto {
            clothing_id,
            kind,
            quantity,
            reason: "weekly count".to_string(),
            recorded_by: Some("Carla".to_string()),
            notes: None,
        }
    }

    fn quantity_of(module: &TestModule, id: Uuid) -> i32 {
        *module.state().clothes[&ClothingId::new(id)]
            .quantity()
            .as_ref()
    }

    #[tokio::test]
    async fn movements_update_quantity_and_ledger() {
        let module = TestModule::new();
        let id = shirt(&module, 4, 1).await;

        let incoming = module
            .record_stock_movement(movement(id, MovementKind::In, 3))
            .await
            .unwrap();
        assert_eq!(incoming.previous_quantity, 4);
        assert_eq!(incoming.new_quantity, 7);

        module
            .record_stock_movement(movement(id, MovementKind::Damage, 2))
            .await
            .unwrap();
        module
            .record_stock_movement(movement(id, MovementKind::Adjustment, 9))
            .await
            .unwrap();
        assert_eq!(quantity_of(&module, id), 9);

        let ledger = module
            .get_stock_movements(GetStockMovementsDto {
                clothing_id: Some(id),
            })
            .await
            .unwrap();
        let kinds = ledger.iter().map(|entry| entry.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![MovementKind::Adjustment, MovementKind::Damage, MovementKind::In]
        );
        assert_eq!(ledger[0].recorded_by, "Carla");
    }

    #[tokio::test]
    async fn movement_cannot_overdraw_stock() {
        let module = TestModule::new();
        let id = shirt(&module, 2, 1).await;
        let report = module
            .record_stock_movement(movement(id, MovementKind::Out, 3))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Conflict));
        assert_eq!(quantity_of(&module, id), 2);
        assert!(module.state().movements.is_empty());
    }

    #[tokio::test]
    async fn movement_requires_reason_and_quantity() {
        let module = TestModule::new();
        let id = shirt(&module, 2, 1).await;
        let report = module
            .record_stock_movement(CreateStockMovementDto {
                reason: " ".to_string(),
                ..movement(id, MovementKind::In, 0)
            })
            .await
            .unwrap_err();
        let fields = field_violations(&report)
            .into_iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["quantity", "reason"]);
    }

    #[tokio::test]
    async fn alerts_group_items_by_condition() {
        let module = TestModule::new();
        let empty = shirt(&module, 0, 0).await;
        let low = shirt(&module, 1, 2).await;
        let alerts = module.get_stock_alerts().await.unwrap();

        assert_eq!(alerts.as_of, date!(2024 - 01 - 03));
        assert_eq!(alerts.out_of_stock.len(), 1);
        assert_eq!(alerts.out_of_stock[0].id, empty);
        let low_ids = alerts.low_stock.iter().map(|item| item.id).collect::<Vec<_>>();
        assert!(low_ids.contains(&low) && low_ids.contains(&empty));
        assert_eq!(alerts.maintenance_due.len(), 2);
        assert_eq!(alerts.total, 5);
    }
}

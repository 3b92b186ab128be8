use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{DestructStockMovement, MovementKind, StockAlerts, StockMovement};

use crate::transfer::ClothingDto;

#[derive(Debug, Clone)]
pub struct StockMovementDto {
    pub id: Uuid,
    pub clothing_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub reason: String,
    pub recorded_by: String,
    pub notes: Option<String>,
    pub recorded_at: OffsetDateTime,
}

impl From<StockMovement> for StockMovementDto {
    fn from(value: StockMovement) -> Self {
        let DestructStockMovement {
            id,
            clothing_id,
            kind,
            quantity,
            previous_quantity,
            new_quantity,
            reason,
            recorded_by,
            notes,
            recorded_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            clothing_id: clothing_id.into(),
            kind,
            quantity: quantity.into(),
            previous_quantity: previous_quantity.into(),
            new_quantity: new_quantity.into(),
            reason: reason.into(),
            recorded_by: recorded_by.into(),
            notes: notes.map(String::from),
            recorded_at: recorded_at.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetStockMovementsDto {
    pub clothing_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct CreateStockMovementDto {
    pub clothing_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub reason: String,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StockAlertsDto {
    pub as_of: Date,
    pub low_stock: Vec<ClothingDto>,
    pub out_of_stock: Vec<ClothingDto>,
    pub maintenance_due: Vec<ClothingDto>,
    pub total: usize,
}

impl StockAlertsDto {
    pub fn new(alerts: StockAlerts, as_of: Date) -> Self {
        let total = alerts.total();
        let convert = |clothes: &Vec<_>| {
            clothes
                .iter()
                .cloned()
                .map(ClothingDto::from)
                .collect::<Vec<_>>()
        };
        Self {
            as_of,
            low_stock: convert(alerts.low_stock()),
            out_of_stock: convert(alerts.out_of_stock()),
            maintenance_due: convert(alerts.maintenance_due()),
            total,
        }
    }
}

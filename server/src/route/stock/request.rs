use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateStockMovementDto, GetStockMovementsDto};
use kernel::prelude::entity::MovementKind;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    clothing_id: Uuid,
    #[serde(rename = "type", alias = "kind")]
    kind: MovementKind,
    quantity: i32,
    #[serde(default)]
    reason: String,
    recorded_by: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    clothing_id: Option<Uuid>,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateStockMovementDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateStockMovementDto {
            clothing_id: input.clothing_id,
            kind: input.kind,
            quantity: input.quantity,
            reason: input.reason,
            recorded_by: input.recorded_by,
            notes: input.notes,
        }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetStockMovementsDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetStockMovementsDto {
            clothing_id: input.clothing_id,
        }
    }
}

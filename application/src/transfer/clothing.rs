use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{Clothing, ClothingStatus, DestructClothing};

#[derive(Debug, Clone)]
pub struct ClothingDto {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub size: String,
    pub color: String,
    pub category: String,
    pub price: Decimal,
    pub status: ClothingStatus,
    pub quantity: i32,
    pub min_quantity: i32,
    pub last_maintenance: Option<Date>,
    pub next_maintenance: Option<Date>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Clothing> for ClothingDto {
    fn from(value: Clothing) -> Self {
        let DestructClothing {
            id,
            name,
            kind,
            size,
            color,
            category,
            price,
            status,
            quantity,
            min_quantity,
            last_maintenance,
            next_maintenance,
            notes,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            size: size.into(),
            color: color.into(),
            category: category.into(),
            price: price.into(),
            status,
            quantity: quantity.into(),
            min_quantity: min_quantity.into(),
            last_maintenance: last_maintenance.map(Date::from),
            next_maintenance: next_maintenance.map(Date::from),
            notes: notes.map(String::from),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct GetClothingDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct GetClothesDto {
    pub status: Option<ClothingStatus>,
    pub q: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateClothingDto {
    pub name: String,
    pub kind: String,
    pub size: String,
    pub color: String,
    pub category: String,
    pub price: Decimal,
    pub status: Option<ClothingStatus>,
    pub quantity: Option<i32>,
    pub min_quantity: Option<i32>,
    pub last_maintenance: Option<Date>,
    pub next_maintenance: Option<Date>,
    pub notes: Option<String>,
}

/// Absent fields are left untouched. Blank notes clear the stored notes.
#[derive(Debug, Clone, Default)]
pub struct UpdateClothingDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<ClothingStatus>,
    pub quantity: Option<i32>,
    pub min_quantity: Option<i32>,
    pub last_maintenance: Option<Date>,
    pub next_maintenance: Option<Date>,
    pub notes: Option<String>,
}

pub struct DeleteClothingDto {
    pub id: Uuid,
}

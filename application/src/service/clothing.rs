use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{ClothingFilter, ClothingQuery, DependOnClothingQuery};
use kernel::interface::update::{ClothingModifier, DependOnClothingModifier};
use kernel::prelude::entity::{
    checked_paging, Clothing, ClothingCategory, ClothingColor, ClothingId, ClothingName,
    ClothingSize, ClothingStatus, ClothingType, CreatedAt, MaintenanceDate, Notes, Price,
    StockQuantity, UpdatedAt,
};
use kernel::KernelError;

use crate::transfer::{
    ClothingDto, CreateClothingDto, DeleteClothingDto, GetClothesDto, GetClothingDto,
    UpdateClothingDto,
};

#[async_trait::async_trait]
pub trait GetClothingService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnClothingQuery
{
    async fn get_clothing(
        &self,
        dto: GetClothingDto,
    ) -> error_stack::Result<Option<ClothingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = ClothingId::new(dto.id);
        let clothing = self.clothing_query().find_by_id(&mut connection, &id).await?;
        Ok(clothing.map(ClothingDto::from))
    }

    async fn get_clothes(
        &self,
        dto: GetClothesDto,
    ) -> error_stack::Result<Vec<ClothingDto>, KernelError> {
        let (limit, offset) = checked_paging(dto.limit, dto.offset)?;
        let mut connection = self.database_connection().transact().await?;
        let filter = ClothingFilter {
            status: dto.status,
            search: dto.q.filter(|q| !q.trim().is_empty()),
            limit: Some(limit.unwrap_or_default()),
            offset,
        };
        let clothes = self.clothing_query().find_all(&mut connection, &filter).await?;
        Ok(clothes.into_iter().map(ClothingDto::from).collect())
    }
}

impl<T> GetClothingService for T where T: DependOnDatabaseConnection + DependOnClothingQuery {}

#[async_trait::async_trait]
pub trait CreateClothingService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnClothingModifier + DependOnClock
{
    async fn create_clothing(
        &self,
        dto: CreateClothingDto,
    ) -> error_stack::Result<ClothingDto, KernelError> {
        let now = self.clock().now();
        let clothing = Clothing::new(
            ClothingId::new(Uuid::new_v4()),
            ClothingName::new(dto.name.trim()),
            ClothingType::new(dto.kind.trim()),
            ClothingSize::new(dto.size.trim()),
            ClothingColor::new(dto.color.trim()),
            ClothingCategory::new(dto.category.trim()),
            Price::new(dto.price),
            dto.status.unwrap_or(ClothingStatus::Available),
            StockQuantity::new(dto.quantity.unwrap_or(1)),
            StockQuantity::new(dto.min_quantity.unwrap_or(0)),
            dto.last_maintenance.map(MaintenanceDate::new),
            dto.next_maintenance.map(MaintenanceDate::new),
            Notes::from_optional(dto.notes),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        clothing.validate()?;

        let mut connection = self.database_connection().transact().await?;
        self.clothing_modifier()
            .create(&mut connection, &clothing)
            .await?;
        connection.commit().await?;

        tracing::info!("Clothing {} added to the catalogue", clothing.id().as_ref());
        Ok(ClothingDto::from(clothing))
    }
}

impl<T> CreateClothingService for T where
    T: DependOnDatabaseConnection + DependOnClothingModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait UpdateClothingService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClothingQuery
    + DependOnClothingModifier
    + DependOnClock
{
    async fn update_clothing(
        &self,
        dto: UpdateClothingDto,
    ) -> error_stack::Result<ClothingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = ClothingId::new(dto.id);
        let clothing = self
            .clothing_query()
            .find_by_ids_for_update(&mut connection, std::slice::from_ref(&id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(&id))?;

        let now = self.clock().now();
        let mut clothing = clothing.into_destruct();
        if let Some(name) = dto.name {
            clothing.name = ClothingName::new(name.trim());
        }
        if let Some(kind) = dto.kind {
            clothing.kind = ClothingType::new(kind.trim());
        }
        if let Some(size) = dto.size {
            clothing.size = ClothingSize::new(size.trim());
        }
        if let Some(color) = dto.color {
            clothing.color = ClothingColor::new(color.trim());
        }
        if let Some(category) = dto.category {
            clothing.category = ClothingCategory::new(category.trim());
        }
        if let Some(price) = dto.price {
            clothing.price = Price::new(price);
        }
        if let Some(status) = dto.status {
            clothing.status = status;
        }
        if let Some(quantity) = dto.quantity {
            clothing.quantity = StockQuantity::new(quantity);
        }
        if let Some(min_quantity) = dto.min_quantity {
            clothing.min_quantity = StockQuantity::new(min_quantity);
        }
        if let Some(last) = dto.last_maintenance {
            clothing.last_maintenance = Some(MaintenanceDate::new(last));
        }
        if let Some(next) = dto.next_maintenance {
            clothing.next_maintenance = Some(MaintenanceDate::new(next));
        }
        if let Some(notes) = dto.notes {
            clothing.notes = Notes::from_optional(Some(notes));
        }
        clothing.updated_at = UpdatedAt::new(now);
        let clothing = clothing.freeze();
        clothing.validate()?;

        self.clothing_modifier()
            .update(&mut connection, &clothing)
            .await?;
        connection.commit().await?;

        tracing::info!("Clothing {} updated", clothing.id().as_ref());
        Ok(ClothingDto::from(clothing))
    }
}

impl<T> UpdateClothingService for T where
    T: DependOnDatabaseConnection
        + DependOnClothingQuery
        + DependOnClothingModifier
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait DeleteClothingService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClothingQuery
    + DependOnClothingModifier
{
    async fn delete_clothing(&self, dto: DeleteClothingDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = ClothingId::new(dto.id);
        let clothing = self
            .clothing_query()
            .find_by_ids_for_update(&mut connection, std::slice::from_ref(&id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(&id))?;
        if *clothing.status() == ClothingStatus::Rented {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Clothing {} is currently rented", id.as_ref())));
        }

        self.clothing_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!("Clothing {} removed from the catalogue", id.as_ref());
        Ok(())
    }
}

impl<T> DeleteClothingService for T where
    T: DependOnDatabaseConnection + DependOnClothingQuery + DependOnClothingModifier
{
}

fn not_found(id: &ClothingId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("Clothing {} does not exist", id.as_ref()))
}

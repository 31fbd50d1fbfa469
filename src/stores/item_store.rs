use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::InternalError;
use crate::types::db::item::{self, Entity as Items};
use crate::types::internal::Item;

/// Repository contract for item persistence
///
/// Implementations may use any backing store satisfying these semantics.
/// Absence of an item is a normal outcome, never an error; only
/// storage-layer faults surface as `InternalError`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Return every currently stored item
    async fn list_all(&self) -> Result<Vec<Item>, InternalError>;

    /// Return the item with the given id, or None if absent
    async fn get_by_id(&self, id: &str) -> Result<Option<Item>, InternalError>;

    /// Store a fully populated item (id and created_at already assigned)
    async fn create(&self, item: Item) -> Result<(), InternalError>;

    /// Replace the stored item matching `item.id` with the given value
    ///
    /// Callers must have verified the item exists.
    async fn update(&self, item: Item) -> Result<(), InternalError>;

    /// Remove the item with the given id; absent ids are a no-op
    async fn delete(&self, id: &str) -> Result<(), InternalError>;
}

/// SqlItemStore persists items through sea-orm
pub struct SqlItemStore {
    db: DatabaseConnection,
}

impl SqlItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_active_model(item: Item) -> item::ActiveModel {
        item::ActiveModel {
            id: Set(item.id),
            name: Set(item.name),
            price: Set(item.price),
            created_at: Set(item.created_at.timestamp()),
        }
    }
}

#[async_trait]
impl ItemRepository for SqlItemStore {
    async fn list_all(&self) -> Result<Vec<Item>, InternalError> {
        let models = Items::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_items", e))?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Item>, InternalError> {
        let model = Items::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_item", e))?;

        Ok(model.map(Item::from))
    }

    async fn create(&self, item: Item) -> Result<(), InternalError> {
        Self::to_active_model(item)
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_item", e))?;

        Ok(())
    }

    async fn update(&self, item: Item) -> Result<(), InternalError> {
        Self::to_active_model(item)
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_item", e))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), InternalError> {
        Items::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        Ok(())
    }
}

impl std::fmt::Debug for SqlItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlItemStore")
            .field("db", &"<connection>")
            .finish()
    }
}

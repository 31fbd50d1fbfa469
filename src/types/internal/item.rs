use chrono::{DateTime, Utc};

use crate::types::db::item;
use crate::types::dto::items::ItemDto;

/// A catalog item as held in the repository.
///
/// `id` and `created_at` are assigned once at creation and carried over
/// unchanged by updates; only `name` and `price` may change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<item::Model> for Item {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            created_at: DateTime::from_timestamp(model.created_at, 0).unwrap_or_default(),
        }
    }
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

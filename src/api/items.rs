use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    ApiResponse, OpenApi, Tags,
};
use uuid::Uuid;

use crate::errors::ItemError;
use crate::stores::ItemRepository;
use crate::types::dto::items::{CreateItemRequest, ItemDto, UpdateItemRequest};
use crate::types::internal::Item;

/// Items API endpoints
pub struct ItemsApi {
    items: Arc<dyn ItemRepository>,
}

impl ItemsApi {
    /// Create a new ItemsApi backed by the given repository
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ApiTags {
    /// Item management endpoints
    Items,
}

/// Response for item creation
#[derive(ApiResponse, Debug)]
pub enum CreateItemResponse {
    /// Item created; the Location header addresses the new resource
    #[oai(status = 201)]
    Created(Json<ItemDto>, #[oai(header = "Location")] String),
}

/// Empty-body success response for update and delete
#[derive(ApiResponse, Debug)]
pub enum NoContentResponse {
    /// Operation completed
    #[oai(status = 204)]
    NoContent,
}

#[OpenApi]
impl ItemsApi {
    /// List items
    ///
    /// Returns all items, or only those whose name contains the given
    /// filter text (case-insensitive substring match)
    #[oai(path = "/items", method = "get", tag = "ApiTags::Items")]
    async fn list_items(
        &self,
        name: Query<Option<String>>,
    ) -> Result<Json<Vec<ItemDto>>, ItemError> {
        let mut items = self.items.list_all().await?;

        if let Some(filter) = name.0.as_deref() {
            let filter = filter.to_lowercase();
            items.retain(|item| item.name.to_lowercase().contains(&filter));
        }

        Ok(Json(items.into_iter().map(ItemDto::from).collect()))
    }

    /// Fetch a single item by id
    #[oai(path = "/items/:id", method = "get", tag = "ApiTags::Items")]
    async fn get_item(&self, id: Path<String>) -> Result<Json<ItemDto>, ItemError> {
        match self.items.get_by_id(&id.0).await? {
            Some(item) => Ok(Json(item.into())),
            None => Err(ItemError::not_found(&id.0)),
        }
    }

    /// Create a new item
    ///
    /// Accepts item details and returns the created item with generated
    /// id and timestamp
    #[oai(path = "/items", method = "post", tag = "ApiTags::Items")]
    async fn create_item(
        &self,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemResponse, ItemError> {
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: body.0.name,
            price: body.0.price,
            created_at: Utc::now(),
        };

        self.items.create(item.clone()).await?;

        let location = format!("/items/{}", item.id);
        Ok(CreateItemResponse::Created(Json(item.into()), location))
    }

    /// Update an existing item's name and price
    #[oai(path = "/items/:id", method = "put", tag = "ApiTags::Items")]
    async fn update_item(
        &self,
        id: Path<String>,
        body: Json<UpdateItemRequest>,
    ) -> Result<NoContentResponse, ItemError> {
        let existing = self
            .items
            .get_by_id(&id.0)
            .await?
            .ok_or_else(|| ItemError::not_found(&id.0))?;

        // id and created_at are carried over unchanged
        let updated = Item {
            name: body.0.name,
            price: body.0.price,
            ..existing
        };

        self.items.update(updated).await?;

        Ok(NoContentResponse::NoContent)
    }

    /// Delete an item
    #[oai(path = "/items/:id", method = "delete", tag = "ApiTags::Items")]
    async fn delete_item(&self, id: Path<String>) -> Result<NoContentResponse, ItemError> {
        if self.items.get_by_id(&id.0).await?.is_none() {
            return Err(ItemError::not_found(&id.0));
        }

        self.items.delete(&id.0).await?;

        Ok(NoContentResponse::NoContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::SqlItemStore;
    use chrono::DateTime;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_api() -> (Arc<SqlItemStore>, ItemsApi) {
        // Create in-memory SQLite database for testing
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = Arc::new(SqlItemStore::new(db));
        let api = ItemsApi::new(store.clone());

        (store, api)
    }

    fn random_item() -> Item {
        Item {
            id: Uuid::new_v4().to_string(),
            name: Uuid::new_v4().to_string(),
            price: 42.0,
            // Truncated to whole seconds so store round-trips compare equal
            created_at: DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap(),
        }
    }

    fn named_item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            ..random_item()
        }
    }

    #[tokio::test]
    async fn test_get_item_with_unknown_id_returns_not_found() {
        let (_store, api) = setup_test_api().await;

        let result = api.get_item(Path(Uuid::new_v4().to_string())).await;

        assert!(result.is_err());
        match result {
            Err(ItemError::NotFound(_)) => {
                // Expected error type
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[tokio::test]
    async fn test_get_item_returns_expected_item() {
        let (store, api) = setup_test_api().await;

        let expected = random_item();
        store
            .create(expected.clone())
            .await
            .expect("Failed to seed item");

        let result = api.get_item(Path(expected.id.clone())).await;

        assert!(result.is_ok());
        let dto = result.unwrap().0;
        assert_eq!(dto.id, expected.id);
        assert_eq!(dto.name, expected.name);
        assert_eq!(dto.price, expected.price);
        assert_eq!(dto.created_at, expected.created_at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_list_items_returns_all_items() {
        let (store, api) = setup_test_api().await;

        let expected = vec![random_item(), random_item(), random_item()];
        for item in &expected {
            store
                .create(item.clone())
                .await
                .expect("Failed to seed item");
        }

        let result = api.list_items(Query(None)).await;

        assert!(result.is_ok());
        let listed = result.unwrap().0;
        assert_eq!(listed.len(), expected.len());

        // Order is unspecified, compare as sets of ids
        let mut expected_ids: Vec<String> = expected.iter().map(|i| i.id.clone()).collect();
        let mut listed_ids: Vec<String> = listed.iter().map(|i| i.id.clone()).collect();
        expected_ids.sort();
        listed_ids.sort();
        assert_eq!(listed_ids, expected_ids);
    }

    #[tokio::test]
    async fn test_list_items_with_no_items_returns_empty_list() {
        let (_store, api) = setup_test_api().await;

        let result = api.list_items(Query(None)).await;

        assert!(result.is_ok());
        assert!(result.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_with_name_filter_returns_matching_items() {
        let (store, api) = setup_test_api().await;

        for name in ["Potion", "Sword", "Strength-Potion"] {
            store
                .create(named_item(name))
                .await
                .expect("Failed to seed item");
        }

        let result = api.list_items(Query(Some("Potion".to_string()))).await;

        assert!(result.is_ok());
        let mut names: Vec<String> = result.unwrap().0.into_iter().map(|i| i.name).collect();
        names.sort();
        assert_eq!(names, vec!["Potion", "Strength-Potion"]);
    }

    #[tokio::test]
    async fn test_list_items_name_filter_is_case_insensitive() {
        let (store, api) = setup_test_api().await;

        for name in ["Potion", "Sword", "Strength-Potion"] {
            store
                .create(named_item(name))
                .await
                .expect("Failed to seed item");
        }

        let result = api.list_items(Query(Some("potion".to_string()))).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().0.len(), 2);
    }

    #[tokio::test]
    async fn test_create_item_returns_created_item_with_id_and_timestamp() {
        let (_store, api) = setup_test_api().await;

        let body = Json(CreateItemRequest {
            name: "Sword".to_string(),
            price: 50.0,
        });

        let result = api.create_item(body).await;

        assert!(result.is_ok());
        let CreateItemResponse::Created(dto, location) = result.unwrap();
        assert!(!dto.0.id.is_empty());
        assert_eq!(dto.0.name, "Sword");
        assert_eq!(dto.0.price, 50.0);
        assert_eq!(location, format!("/items/{}", dto.0.id));

        // Creation timestamp should be close to now
        let created_at = DateTime::parse_from_rfc3339(&dto.0.created_at)
            .expect("created_at should be valid RFC 3339");
        let age = (Utc::now() - created_at.with_timezone(&Utc)).num_seconds().abs();
        assert!(age < 5); // Within 5 seconds tolerance
    }

    #[tokio::test]
    async fn test_create_item_assigns_distinct_ids() {
        let (_store, api) = setup_test_api().await;

        let first = api
            .create_item(Json(CreateItemRequest {
                name: "Potion".to_string(),
                price: 10.0,
            }))
            .await
            .unwrap();
        let second = api
            .create_item(Json(CreateItemRequest {
                name: "Potion".to_string(),
                price: 10.0,
            }))
            .await
            .unwrap();

        let CreateItemResponse::Created(first_dto, _) = first;
        let CreateItemResponse::Created(second_dto, _) = second;
        assert_ne!(first_dto.0.id, second_dto.0.id);
    }

    #[tokio::test]
    async fn test_created_item_can_be_fetched_by_returned_id() {
        let (_store, api) = setup_test_api().await;

        let created = api
            .create_item(Json(CreateItemRequest {
                name: "Sword".to_string(),
                price: 50.0,
            }))
            .await
            .unwrap();
        let CreateItemResponse::Created(created_dto, _) = created;

        let fetched = api.get_item(Path(created_dto.0.id.clone())).await;

        assert!(fetched.is_ok());
        let fetched = fetched.unwrap().0;
        assert_eq!(fetched.id, created_dto.0.id);
        assert_eq!(fetched.name, "Sword");
        assert_eq!(fetched.price, 50.0);
    }

    #[tokio::test]
    async fn test_update_item_with_unknown_id_returns_not_found() {
        let (store, api) = setup_test_api().await;

        let existing = random_item();
        store
            .create(existing.clone())
            .await
            .expect("Failed to seed item");

        let body = Json(UpdateItemRequest {
            name: "Shield".to_string(),
            price: 75.0,
        });
        let result = api.update_item(Path(Uuid::new_v4().to_string()), body).await;

        assert!(result.is_err());
        match result {
            Err(ItemError::NotFound(_)) => {
                // Expected error type
            }
            _ => panic!("Expected NotFound error"),
        }

        // Repository contents must be untouched
        let items = store.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], existing);
    }

    #[tokio::test]
    async fn test_update_item_returns_no_content() {
        let (store, api) = setup_test_api().await;

        let existing = random_item();
        store
            .create(existing.clone())
            .await
            .expect("Failed to seed item");

        let body = Json(UpdateItemRequest {
            name: "Shield".to_string(),
            price: 75.0,
        });
        let result = api.update_item(Path(existing.id.clone()), body).await;

        assert!(matches!(result, Ok(NoContentResponse::NoContent)));
    }

    #[tokio::test]
    async fn test_update_item_overwrites_name_and_price_only() {
        let (store, api) = setup_test_api().await;

        let existing = random_item();
        store
            .create(existing.clone())
            .await
            .expect("Failed to seed item");

        let body = Json(UpdateItemRequest {
            name: "Shield".to_string(),
            price: 75.0,
        });
        api.update_item(Path(existing.id.clone()), body)
            .await
            .expect("Update should succeed");

        let fetched = api.get_item(Path(existing.id.clone())).await.unwrap().0;
        assert_eq!(fetched.name, "Shield");
        assert_eq!(fetched.price, 75.0);
        // id and created_at are preserved across the update
        assert_eq!(fetched.id, existing.id);
        assert_eq!(fetched.created_at, existing.created_at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_delete_item_with_unknown_id_returns_not_found() {
        let (store, api) = setup_test_api().await;

        let existing = random_item();
        store
            .create(existing.clone())
            .await
            .expect("Failed to seed item");

        let result = api.delete_item(Path(Uuid::new_v4().to_string())).await;

        assert!(result.is_err());
        match result {
            Err(ItemError::NotFound(_)) => {
                // Expected error type
            }
            _ => panic!("Expected NotFound error"),
        }

        // The seeded item must still be there
        let items = store.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_item_then_get_returns_not_found() {
        let (_store, api) = setup_test_api().await;

        let created = api
            .create_item(Json(CreateItemRequest {
                name: "Potion".to_string(),
                price: 10.0,
            }))
            .await
            .unwrap();
        let CreateItemResponse::Created(dto, _) = created;

        let deleted = api.delete_item(Path(dto.0.id.clone())).await;
        assert!(matches!(deleted, Ok(NoContentResponse::NoContent)));

        let result = api.get_item(Path(dto.0.id.clone())).await;
        match result {
            Err(ItemError::NotFound(_)) => {
                // Expected error type
            }
            _ => panic!("Expected NotFound error"),
        }
    }
}

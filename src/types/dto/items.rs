use poem_openapi::Object;

/// Request model for creating a new item
#[derive(Object, Debug)]
pub struct CreateItemRequest {
    /// Name of the item (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,

    /// Price of the item, must not be negative
    #[oai(validator(minimum(value = "0")))]
    pub price: f64,
}

/// Request model for updating an existing item
///
/// Same shape as the create request; the target item is addressed
/// by the id in the request path.
#[derive(Object, Debug)]
pub struct UpdateItemRequest {
    /// New name for the item (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,

    /// New price for the item, must not be negative
    #[oai(validator(minimum(value = "0")))]
    pub price: f64,
}

/// Response model representing an item
#[derive(Object, Debug)]
pub struct ItemDto {
    /// Unique identifier for the item
    pub id: String,

    /// Name of the item
    pub name: String,

    /// Price of the item
    pub price: f64,

    /// Timestamp when the item was created (ISO 8601 format)
    pub created_at: String,
}

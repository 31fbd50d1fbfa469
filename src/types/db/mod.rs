// Database entity models (sea-orm)
pub mod item;

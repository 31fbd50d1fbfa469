// Library exports for integration tests and external use

pub mod api;
pub mod config;
pub mod errors;
pub mod stores;
pub mod types;

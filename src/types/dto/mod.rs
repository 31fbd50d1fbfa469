// Transfer objects exposed through the HTTP API
pub mod common;
pub mod items;

// Internal domain types, independent of wire and table shapes
pub mod item;

pub use item::Item;

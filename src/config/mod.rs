mod database;
mod logging;

pub use database::{connect_database, migrate_database};
pub use logging::{init_logging, LoggingError};

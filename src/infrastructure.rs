// Infrastructure layer modules
pub mod config;
pub mod item_table;
pub mod logging;

// Re-exports
pub use config::DynamoDbConfig;
pub use item_table::{DynamoItemTable, ItemTable, StorageError};
pub use logging::init_logging;

// Domain layer modules
pub mod api_response;
pub mod audit_record;
pub mod employee;
pub mod item;

// Re-exports
pub use api_response::ApiResponse;
pub use audit_record::AuditRecord;
pub use employee::{Employee, MissingField, PayloadError};
pub use item::{Item, ItemKey};

// アプリケーション層モジュール
pub mod audit_event_handler;
pub mod employee_handler;

// 再エクスポート
pub use audit_event_handler::{AuditEventHandler, AuditEventHandlerError};
pub use employee_handler::{EmployeeHandler, EmployeeHandlerError, EmployeeRequest};

//! Payroll Employee Records
//!
//! Employees are validated once, at construction, and carried around as plain
//! values.

pub mod domain;
pub use domain::{Config, Email, Employee, EmployeeId, EmployeeRecord, Error, FieldText};

/// In-memory persistence and roster file loading.
pub mod storage;
pub use storage::{Registry, Roster};

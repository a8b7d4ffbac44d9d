//! Domain models for employee records.
//!
//! This module contains the validated employee value, the field newtypes it is
//! built from, its raw wire form, and configuration.

/// Employee value type and its validating constructor.
pub mod employee;
pub use employee::{Employee, EmployeeId, Error};

/// Non-blank text fields.
pub mod text;
pub use text::FieldText;

/// Email address field and pattern check.
pub mod email;
pub use email::{Email, is_valid_email};

/// Unchecked wire representation of an employee.
pub mod record;
pub use record::EmployeeRecord;

mod config;
pub use config::Config;

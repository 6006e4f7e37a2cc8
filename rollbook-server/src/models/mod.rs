//! Domain models
//!
//! Request payloads are checked for shape and type by serde during
//! extraction. Uniqueness is left to the store.

pub mod student;

pub use student::{AddRecordResponse, StudentRecord};

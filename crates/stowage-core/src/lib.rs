//! stowage-core
//!
//! Pure domain types for storage account reconciliation: the desired spec a
//! host hands us, the state the provider reports, and the result record we
//! hand back. No network dependency.

pub mod error;
pub mod models;
pub mod validate;

pub use crate::error::ValidationError;
pub use crate::validate::validate;

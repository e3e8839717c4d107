//! stowage-arm
//!
//! Azure Resource Manager operations for storage accounts, plus the minimal
//! blob data-plane call needed to tell whether an account is in use. Thin
//! wrapper around `reqwest`; token acquisition happens elsewhere.

pub mod accounts;
pub mod blob;
pub mod client;
pub mod error;
pub mod operations;
pub mod resource_groups;
pub mod wire;

pub use crate::client::{ArmClient, ArmConfig};
pub use crate::error::ArmError;

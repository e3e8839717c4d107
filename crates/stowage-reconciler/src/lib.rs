//! stowage-reconciler
//!
//! Converges one storage account to a declared spec.
//!
//! Public API:
//! - `Reconciler::reconcile()`: validate → read → plan → apply → re-read
//! - `plan::plan()`: pure diff & guard engine
//! - `read::fetch()`: current state, or `None` when the account is absent
//! - `ProviderClient`: control-plane seam, implemented for `ArmClient`

pub mod arm;
pub mod error;
pub mod orchestrate;
pub mod plan;
pub mod poll;
pub mod provider;
pub mod read;

pub use crate::error::ReconcileError;
pub use crate::orchestrate::Reconciler;
pub use crate::plan::{CreatePlan, PlannedAction};
pub use crate::poll::PollPolicy;
pub use crate::provider::{ProviderClient, ProviderError, ProviderErrorKind};

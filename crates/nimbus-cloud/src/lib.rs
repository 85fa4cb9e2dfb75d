//! Nimbus cloud core
//!
//! Provider-independent lifecycle control for a single named compute
//! instance. One invocation runs a strictly sequential pipeline:
//!
//! ```text
//! validate config → probe auth → resolve names → locate instance → transition
//! ```
//!
//! Each stage consumes the previous stage's output and the first failure
//! aborts the rest. The provider side of the boundary is the
//! [`CloudGateway`] trait; this crate never caches provider state between
//! invocations and issues at most one state-changing call per run.

pub mod error;
pub mod gateway;
pub mod instance;
pub mod probe;
pub mod resolve;
pub mod transition;

// Re-exports
pub use error::{CloudError, ResourceKind, Result};
pub use gateway::CloudGateway;
pub use instance::{CreateInstance, Flavor, Image, Instance, InstanceStatus, SshKey};
pub use probe::{Preflight, preflight};
pub use transition::{Outcome, SkipReason, Transition, apply, create, plan_delete, plan_shelve, plan_start};

//! Lifecycle pipeline error types
//!
//! Every variant is terminal for the invocation; there is no retry at
//! this layer. Provider error bodies are carried as opaque JSON so the
//! operator sees exactly what the API returned.

use serde_json::Value;
use thiserror::Error;

/// Kind of named resource that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Project,
    Region,
    SshKey,
    Flavor,
    Image,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Project => write!(f, "project"),
            ResourceKind::Region => write!(f, "region"),
            ResourceKind::SshKey => write!(f, "SSH key"),
            ResourceKind::Flavor => write!(f, "flavor"),
            ResourceKind::Image => write!(f, "image"),
        }
    }
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum CloudError {
    /// Required parameters absent or empty, detected before any network
    /// call. Names every missing parameter, not just the first.
    #[error("missing required configuration: {}", missing.join(", "))]
    MissingConfiguration { missing: Vec<String> },

    #[error("invalid configuration for {name}: {detail}")]
    InvalidConfiguration { name: String, detail: String },

    /// Transport failure or a rejected read. `payload` is the raw
    /// provider error body when one was received, `Null` otherwise.
    #[error("cloud API unavailable: {detail}")]
    ApiUnavailable { detail: String, payload: Value },

    /// The credential was rejected (HTTP 401/403), raw body attached.
    #[error("credentials rejected by the provider")]
    Unauthorized { payload: Value },

    /// A named reference did not match any listing entry. `candidates`
    /// is the full listing, for operator diagnosis.
    #[error("{kind} \"{name}\" not found (available: {})", candidates.join(", "))]
    ResourceNotFound {
        kind: ResourceKind,
        name: String,
        candidates: Vec<String>,
    },

    #[error("instance \"{0}\" not found")]
    InstanceNotFound(String),

    /// The observed status is not one the requested operation acts on.
    #[error("instance \"{name}\" is in unexpected state {observed}")]
    UnexpectedState { name: String, observed: String },

    /// A state-changing call was rejected by the provider.
    #[error("transition rejected by the provider (HTTP {status})")]
    TransitionRejected { status: u16, payload: Value },
}

pub type Result<T> = std::result::Result<T, CloudError>;

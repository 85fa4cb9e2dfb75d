//! Lifecycle transition engine
//!
//! A one-observation state machine: given the freshly observed instance
//! (or its absence) and the requested operation, decide the single
//! state-changing call to issue, if any. Planning is pure so the
//! decision table is testable without a network; [`apply`] issues the
//! call fire-and-forget and never polls for completion, the provider
//! reconciles asynchronously.

use crate::error::{CloudError, Result};
use crate::gateway::CloudGateway;
use crate::instance::{CreateInstance, Instance, InstanceStatus};

/// The single state-changing call selected for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Start { instance_id: String },
    Delete { instance_id: String },
    Shelve { instance_id: String },
    /// Nothing to issue; the invocation still succeeds.
    Skip(SkipReason),
}

/// Why no call is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Already in the desired state.
    AlreadyActive,
    /// No instance with the target name exists.
    AlreadyAbsent,
    /// The observed status does not accept a shelve call.
    NotShelvable(InstanceStatus),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyActive => write!(f, "instance is already running"),
            SkipReason::AlreadyAbsent => write!(f, "no such instance, nothing to do"),
            SkipReason::NotShelvable(status) => {
                write!(f, "status {status} is not eligible to be shelved")
            }
        }
    }
}

/// Decide the start transition from the observed status.
///
/// `ACTIVE` is an idempotent success; `STOPPED` starts; absence is an
/// error (cannot start what was never created); any other status is
/// unexpected and never blindly acted on.
pub fn plan_start(name: &str, observed: Option<&Instance>) -> Result<Transition> {
    let Some(instance) = observed else {
        return Err(CloudError::InstanceNotFound(name.to_string()));
    };
    match &instance.status {
        InstanceStatus::Active => Ok(Transition::Skip(SkipReason::AlreadyActive)),
        InstanceStatus::Stopped => Ok(Transition::Start {
            instance_id: instance.id.clone(),
        }),
        other => Err(CloudError::UnexpectedState {
            name: instance.name.clone(),
            observed: other.as_str().to_string(),
        }),
    }
}

/// Hard stop. Delete is accepted from any status; a missing instance is
/// a no-op success.
pub fn plan_delete(observed: Option<&Instance>) -> Transition {
    match observed {
        Some(instance) => Transition::Delete {
            instance_id: instance.id.clone(),
        },
        None => Transition::Skip(SkipReason::AlreadyAbsent),
    }
}

/// Soft stop. Shelve only from a status the provider accepts; anything
/// else degrades to a diagnostic no-op rather than an error.
pub fn plan_shelve(observed: Option<&Instance>) -> Transition {
    match observed {
        None => Transition::Skip(SkipReason::AlreadyAbsent),
        Some(instance) if instance.status.can_shelve() => Transition::Shelve {
            instance_id: instance.id.clone(),
        },
        Some(instance) => Transition::Skip(SkipReason::NotShelvable(instance.status.clone())),
    }
}

/// What happened when the plan was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The call was accepted for processing; completion is the
    /// provider's asynchronous concern.
    Issued {
        action: &'static str,
        instance_id: String,
    },
    Skipped(SkipReason),
}

/// Issue the planned call. At most one request leaves here.
pub async fn apply(
    gateway: &dyn CloudGateway,
    project: &str,
    transition: Transition,
) -> Result<Outcome> {
    match transition {
        Transition::Start { instance_id } => {
            gateway.start_instance(project, &instance_id).await?;
            tracing::info!(%instance_id, "start requested");
            Ok(Outcome::Issued {
                action: "start",
                instance_id,
            })
        }
        Transition::Delete { instance_id } => {
            gateway.delete_instance(project, &instance_id).await?;
            tracing::info!(%instance_id, "delete requested");
            Ok(Outcome::Issued {
                action: "delete",
                instance_id,
            })
        }
        Transition::Shelve { instance_id } => {
            gateway.shelve_instance(project, &instance_id).await?;
            tracing::info!(%instance_id, "shelve requested");
            Ok(Outcome::Issued {
                action: "shelve",
                instance_id,
            })
        }
        Transition::Skip(reason) => {
            tracing::info!(%reason, "no transition issued");
            Ok(Outcome::Skipped(reason))
        }
    }
}

/// Issue the create call. Once every reference has resolved, create is
/// unconditional: there is deliberately no lookup for an existing
/// instance of the same name first, matching the provider's own
/// acceptance of duplicate names.
pub async fn create(
    gateway: &dyn CloudGateway,
    project: &str,
    spec: &CreateInstance,
) -> Result<Instance> {
    let instance = gateway.create_instance(project, spec).await?;
    tracing::info!(id = %instance.id, name = %instance.name, "create requested");
    Ok(instance)
}

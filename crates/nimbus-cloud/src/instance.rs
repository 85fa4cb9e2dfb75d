//! Instance model and resolved resource references

use serde::{Deserialize, Serialize};

/// One cloud compute resource, as last observed from the provider.
///
/// The status is a snapshot taken in the current invocation. The
/// provider mutates it asynchronously after a transition call; this
/// system only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub status: InstanceStatus,
}

/// Provider-reported instance status.
///
/// The provider defines more statuses than the lifecycle engine acts on
/// (building, rebooting, error states, ...); anything outside the known
/// set is kept verbatim in `Other` and never blindly acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceStatus {
    Active,
    Stopped,
    Shutoff,
    Shelved,
    Other(String),
}

impl InstanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::Active => "ACTIVE",
            InstanceStatus::Stopped => "STOPPED",
            InstanceStatus::Shutoff => "SHUTOFF",
            InstanceStatus::Shelved => "SHELVED",
            InstanceStatus::Other(status) => status,
        }
    }

    /// Statuses the provider accepts a shelve call from.
    pub fn can_shelve(&self) -> bool {
        matches!(
            self,
            InstanceStatus::Active | InstanceStatus::Shutoff | InstanceStatus::Stopped
        )
    }
}

impl From<String> for InstanceStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "ACTIVE" => InstanceStatus::Active,
            "STOPPED" => InstanceStatus::Stopped,
            "SHUTOFF" => InstanceStatus::Shutoff,
            "SHELVED" => InstanceStatus::Shelved,
            _ => InstanceStatus::Other(status),
        }
    }
}

impl From<InstanceStatus> for String {
    fn from(status: InstanceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SSH key entry as listed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: String,
    pub name: String,
}

/// Machine-size profile, region-scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    pub id: String,
    pub name: String,
}

/// OS disk template used to boot an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
}

/// Request to create a new instance. Every reference is already
/// resolved to a provider identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInstance {
    pub name: String,
    pub region: String,
    pub flavor_id: String,
    pub image_id: String,
    pub ssh_key_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_known_and_unknown_values() {
        assert_eq!(InstanceStatus::from("ACTIVE".to_string()), InstanceStatus::Active);
        assert_eq!(InstanceStatus::from("SHUTOFF".to_string()), InstanceStatus::Shutoff);

        let rebuilding = InstanceStatus::from("REBUILDING".to_string());
        assert_eq!(rebuilding, InstanceStatus::Other("REBUILDING".to_string()));
        assert_eq!(rebuilding.as_str(), "REBUILDING");
    }

    #[test]
    fn shelve_eligibility_covers_the_documented_set() {
        assert!(InstanceStatus::Active.can_shelve());
        assert!(InstanceStatus::Stopped.can_shelve());
        assert!(InstanceStatus::Shutoff.can_shelve());
        assert!(!InstanceStatus::Shelved.can_shelve());
        assert!(!InstanceStatus::Other("REBOOTING".to_string()).can_shelve());
    }
}

//! Cloud gateway trait definition

use crate::error::Result;
use crate::instance::{CreateInstance, Flavor, Image, Instance, SshKey};
use async_trait::async_trait;
use serde_json::Value;

/// Authenticated, project-scoped cloud API boundary.
///
/// Implementations own credentials, request signing and transport. Every
/// method maps to exactly one HTTP call and returns fresh provider
/// state; the pipeline above issues them strictly in sequence.
#[async_trait]
pub trait CloudGateway: Send + Sync {
    /// Provider clock. Used as the reachability probe.
    async fn server_time(&self) -> Result<i64>;

    /// Identity bound to the credential. Used as the authorization
    /// probe; the payload is forwarded untouched.
    async fn current_identity(&self) -> Result<Value>;

    /// Projects the credential can access, as plain name strings.
    async fn list_projects(&self) -> Result<Vec<String>>;

    /// Region names available in the project.
    async fn list_regions(&self, project: &str) -> Result<Vec<String>>;

    async fn list_ssh_keys(&self, project: &str) -> Result<Vec<SshKey>>;

    /// Flavors offered in the given region.
    async fn list_flavors(&self, project: &str, region: &str) -> Result<Vec<Flavor>>;

    /// Linux images bootable on the given flavor in the given region.
    async fn list_images(&self, project: &str, region: &str, flavor_id: &str)
    -> Result<Vec<Image>>;

    async fn list_instances(&self, project: &str) -> Result<Vec<Instance>>;

    /// Issue a create call. Returns the instance as the provider
    /// reports it immediately after acceptance.
    async fn create_instance(&self, project: &str, spec: &CreateInstance) -> Result<Instance>;

    async fn start_instance(&self, project: &str, instance_id: &str) -> Result<()>;

    /// Hard stop: delete the instance.
    async fn delete_instance(&self, project: &str, instance_id: &str) -> Result<()>;

    /// Soft stop: suspend the instance, keeping its disk.
    async fn shelve_instance(&self, project: &str, instance_id: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::instance::InstanceStatus;
    use std::sync::Mutex;

    /// In-memory gateway serving canned listings and recording every
    /// issued call, so tests can assert exactly which requests left.
    #[derive(Default)]
    pub struct MockGateway {
        pub projects: Vec<String>,
        pub regions: Vec<String>,
        pub ssh_keys: Vec<SshKey>,
        pub flavors: Vec<Flavor>,
        pub images: Vec<Image>,
        pub instances: Vec<Instance>,
        pub calls: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Only the state-changing calls, for "at most one" assertions.
        pub fn transitions(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|call| {
                    ["create:", "start:", "delete:", "shelve:"]
                        .iter()
                        .any(|prefix| call.starts_with(prefix))
                })
                .collect()
        }
    }

    #[async_trait]
    impl CloudGateway for MockGateway {
        async fn server_time(&self) -> Result<i64> {
            self.record("time");
            Ok(1_700_000_000)
        }

        async fn current_identity(&self) -> Result<Value> {
            self.record("me");
            Ok(serde_json::json!({ "nichandle": "tester" }))
        }

        async fn list_projects(&self) -> Result<Vec<String>> {
            self.record("projects");
            Ok(self.projects.clone())
        }

        async fn list_regions(&self, project: &str) -> Result<Vec<String>> {
            self.record(format!("regions:{project}"));
            Ok(self.regions.clone())
        }

        async fn list_ssh_keys(&self, project: &str) -> Result<Vec<SshKey>> {
            self.record(format!("sshkeys:{project}"));
            Ok(self.ssh_keys.clone())
        }

        async fn list_flavors(&self, project: &str, region: &str) -> Result<Vec<Flavor>> {
            self.record(format!("flavors:{project}:{region}"));
            Ok(self.flavors.clone())
        }

        async fn list_images(
            &self,
            project: &str,
            region: &str,
            flavor_id: &str,
        ) -> Result<Vec<Image>> {
            self.record(format!("images:{project}:{region}:{flavor_id}"));
            Ok(self.images.clone())
        }

        async fn list_instances(&self, project: &str) -> Result<Vec<Instance>> {
            self.record(format!("instances:{project}"));
            Ok(self.instances.clone())
        }

        async fn create_instance(
            &self,
            project: &str,
            spec: &CreateInstance,
        ) -> Result<Instance> {
            self.record(format!("create:{project}:{}", spec.name));
            Ok(Instance {
                id: "created-id".to_string(),
                name: spec.name.clone(),
                status: InstanceStatus::Other("BUILD".to_string()),
            })
        }

        async fn start_instance(&self, project: &str, instance_id: &str) -> Result<()> {
            self.record(format!("start:{project}:{instance_id}"));
            Ok(())
        }

        async fn delete_instance(&self, project: &str, instance_id: &str) -> Result<()> {
            self.record(format!("delete:{project}:{instance_id}"));
            Ok(())
        }

        async fn shelve_instance(&self, project: &str, instance_id: &str) -> Result<()> {
            self.record(format!("shelve:{project}:{instance_id}"));
            Ok(())
        }
    }
}

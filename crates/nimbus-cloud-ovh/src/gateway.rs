//! `CloudGateway` implementation over the OVH `/cloud` endpoints

use crate::client::OvhClient;
use async_trait::async_trait;
use nimbus_cloud::{
    CloudGateway, CreateInstance, Flavor, Image, Instance, InstanceStatus, Result, SshKey,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct OvhSshKey {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OvhFlavor {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OvhImage {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OvhInstance {
    id: String,
    name: String,
    status: String,
}

impl From<OvhInstance> for Instance {
    fn from(raw: OvhInstance) -> Self {
        Instance {
            id: raw.id,
            name: raw.name,
            status: InstanceStatus::from(raw.status),
        }
    }
}

#[async_trait]
impl CloudGateway for OvhClient {
    async fn server_time(&self) -> Result<i64> {
        self.fetch_server_time().await
    }

    async fn current_identity(&self) -> Result<Value> {
        self.get("/me", &[]).await
    }

    async fn list_projects(&self) -> Result<Vec<String>> {
        self.get("/cloud/project", &[]).await
    }

    async fn list_regions(&self, project: &str) -> Result<Vec<String>> {
        self.get(&format!("/cloud/project/{project}/region"), &[]).await
    }

    async fn list_ssh_keys(&self, project: &str) -> Result<Vec<SshKey>> {
        let keys: Vec<OvhSshKey> = self
            .get(&format!("/cloud/project/{project}/sshkey"), &[])
            .await?;
        Ok(keys
            .into_iter()
            .map(|key| SshKey {
                id: key.id,
                name: key.name,
            })
            .collect())
    }

    async fn list_flavors(&self, project: &str, region: &str) -> Result<Vec<Flavor>> {
        let flavors: Vec<OvhFlavor> = self
            .get(
                &format!("/cloud/project/{project}/flavor"),
                &[("region", region)],
            )
            .await?;
        Ok(flavors
            .into_iter()
            .map(|flavor| Flavor {
                id: flavor.id,
                name: flavor.name,
            })
            .collect())
    }

    async fn list_images(
        &self,
        project: &str,
        region: &str,
        flavor_id: &str,
    ) -> Result<Vec<Image>> {
        let images: Vec<OvhImage> = self
            .get(
                &format!("/cloud/project/{project}/image"),
                &[
                    ("flavorType", flavor_id),
                    ("osType", "linux"),
                    ("region", region),
                ],
            )
            .await?;
        Ok(images
            .into_iter()
            .map(|image| Image {
                id: image.id,
                name: image.name,
            })
            .collect())
    }

    async fn list_instances(&self, project: &str) -> Result<Vec<Instance>> {
        let instances: Vec<OvhInstance> = self
            .get(&format!("/cloud/project/{project}/instance"), &[])
            .await?;
        Ok(instances.into_iter().map(Instance::from).collect())
    }

    async fn create_instance(&self, project: &str, spec: &CreateInstance) -> Result<Instance> {
        let body = json!({
            "flavorId": spec.flavor_id,
            "imageId": spec.image_id,
            "name": spec.name,
            "region": spec.region,
            "sshKeyId": spec.ssh_key_id,
        });
        let raw: OvhInstance = self
            .post(&format!("/cloud/project/{project}/instance"), body)
            .await?;
        Ok(raw.into())
    }

    async fn start_instance(&self, project: &str, instance_id: &str) -> Result<()> {
        let _: Value = self
            .post(
                &format!("/cloud/project/{project}/instance/{instance_id}/start"),
                json!({}),
            )
            .await?;
        Ok(())
    }

    async fn delete_instance(&self, project: &str, instance_id: &str) -> Result<()> {
        self.delete(&format!("/cloud/project/{project}/instance/{instance_id}"))
            .await?;
        Ok(())
    }

    async fn shelve_instance(&self, project: &str, instance_id: &str) -> Result<()> {
        let _: Value = self
            .post(
                &format!("/cloud/project/{project}/instance/{instance_id}/shelve"),
                json!({}),
            )
            .await?;
        Ok(())
    }
}

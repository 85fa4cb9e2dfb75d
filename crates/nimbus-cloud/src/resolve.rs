//! Name-to-identifier resolution and instance lookup
//!
//! Every lookup fetches its listing fresh on the call; nothing is cached
//! across calls or invocations. Matching is first-match-wins and
//! case-sensitive, except SSH keys which match case-insensitively on
//! either id or name. Resolution is linear and fail-fast because later
//! lookups are parameterized by earlier results (the image listing is
//! filtered by the resolved flavor id).

use crate::error::{CloudError, ResourceKind, Result};
use crate::gateway::CloudGateway;
use crate::instance::{Flavor, Image, Instance, SshKey};

/// Succeeds only if `name` is literally present in the accessible
/// project list.
pub async fn resolve_project(gateway: &dyn CloudGateway, name: &str) -> Result<String> {
    let projects = gateway.list_projects().await?;
    if projects.iter().any(|project| project == name) {
        tracing::debug!(project = name, "project resolved");
        return Ok(name.to_string());
    }
    Err(CloudError::ResourceNotFound {
        kind: ResourceKind::Project,
        name: name.to_string(),
        candidates: projects,
    })
}

pub async fn resolve_region(
    gateway: &dyn CloudGateway,
    project: &str,
    name: &str,
) -> Result<String> {
    let regions = gateway.list_regions(project).await?;
    if regions.iter().any(|region| region == name) {
        tracing::debug!(region = name, "region resolved");
        return Ok(name.to_string());
    }
    Err(CloudError::ResourceNotFound {
        kind: ResourceKind::Region,
        name: name.to_string(),
        candidates: regions,
    })
}

/// Matches `identifier` case-insensitively against either the key id or
/// its name; the first match wins. Candidates are reported as
/// `name (id)` pairs.
pub async fn resolve_ssh_key(
    gateway: &dyn CloudGateway,
    project: &str,
    identifier: &str,
) -> Result<SshKey> {
    let keys = gateway.list_ssh_keys(project).await?;
    if let Some(key) = keys.iter().find(|key| {
        key.id.eq_ignore_ascii_case(identifier) || key.name.eq_ignore_ascii_case(identifier)
    }) {
        tracing::debug!(key = %key.name, id = %key.id, "SSH key resolved");
        return Ok(key.clone());
    }
    Err(CloudError::ResourceNotFound {
        kind: ResourceKind::SshKey,
        name: identifier.to_string(),
        candidates: keys
            .iter()
            .map(|key| format!("{} ({})", key.name, key.id))
            .collect(),
    })
}

/// Exact name match against the flavors offered in `region`.
pub async fn resolve_flavor(
    gateway: &dyn CloudGateway,
    project: &str,
    region: &str,
    name: &str,
) -> Result<Flavor> {
    let flavors = gateway.list_flavors(project, region).await?;
    if let Some(flavor) = flavors.iter().find(|flavor| flavor.name == name) {
        tracing::debug!(flavor = %flavor.name, id = %flavor.id, "flavor resolved");
        return Ok(flavor.clone());
    }
    Err(CloudError::ResourceNotFound {
        kind: ResourceKind::Flavor,
        name: name.to_string(),
        candidates: flavors.into_iter().map(|flavor| flavor.name).collect(),
    })
}

/// Exact name match against the images bootable on the resolved flavor.
/// Must run after flavor resolution; the listing is filtered by
/// `flavor_id`.
pub async fn resolve_image(
    gateway: &dyn CloudGateway,
    project: &str,
    region: &str,
    flavor_id: &str,
    name: &str,
) -> Result<Image> {
    let images = gateway.list_images(project, region, flavor_id).await?;
    if let Some(image) = images.iter().find(|image| image.name == name) {
        tracing::debug!(image = %image.name, id = %image.id, "image resolved");
        return Ok(image.clone());
    }
    Err(CloudError::ResourceNotFound {
        kind: ResourceKind::Image,
        name: name.to_string(),
        candidates: images.into_iter().map(|image| image.name).collect(),
    })
}

/// Locate the instance by exact name. Absence is a valid, expected
/// outcome, not an error; the caller decides whether it is terminal.
pub async fn find_instance(
    gateway: &dyn CloudGateway,
    project: &str,
    name: &str,
) -> Result<Option<Instance>> {
    let instances = gateway.list_instances(project).await?;
    Ok(instances.into_iter().find(|instance| instance.name == name))
}

use crate::commands::print_instance;
use crate::config::InstanceSettings;
use colored::Colorize;
use nimbus_cloud::{Result, probe, resolve};
use nimbus_cloud_ovh::OvhClient;

pub async fn handle(instance_override: Option<&str>) -> Result<()> {
    let InstanceSettings {
        base,
        instance_name,
    } = InstanceSettings::from_env(instance_override)?;

    let gateway = OvhClient::new(base.credentials)?;
    probe::preflight(&gateway).await?;

    let project = resolve::resolve_project(&gateway, &base.service_name).await?;
    match resolve::find_instance(&gateway, &project, &instance_name).await? {
        Some(instance) => print_instance(&instance),
        None => println!(
            "{}",
            format!("ℹ instance '{instance_name}' not found").dimmed()
        ),
    }

    Ok(())
}

use crate::commands::{print_instance, print_outcome};
use crate::config::InstanceSettings;
use colored::Colorize;
use nimbus_cloud::{Result, probe, resolve, transition};
use nimbus_cloud_ovh::OvhClient;

pub async fn handle(instance_override: Option<&str>) -> Result<()> {
    let InstanceSettings {
        base,
        instance_name,
    } = InstanceSettings::from_env(instance_override)?;

    println!(
        "{}",
        format!("Starting instance '{instance_name}'...").yellow()
    );

    let gateway = OvhClient::new(base.credentials)?;
    probe::preflight(&gateway).await?;

    let project = resolve::resolve_project(&gateway, &base.service_name).await?;
    let observed = resolve::find_instance(&gateway, &project, &instance_name).await?;
    if let Some(instance) = &observed {
        print_instance(instance);
    }

    let plan = transition::plan_start(&instance_name, observed.as_ref())?;
    let outcome = transition::apply(&gateway, &project, plan).await?;
    print_outcome(&outcome);

    Ok(())
}

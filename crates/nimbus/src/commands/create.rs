use crate::config::CreateSettings;
use colored::Colorize;
use nimbus_cloud::{CreateInstance, Result, probe, resolve, transition};
use nimbus_cloud_ovh::OvhClient;

pub async fn handle() -> Result<()> {
    let settings = CreateSettings::from_env()?;
    let CreateSettings {
        base,
        instance_name,
        region,
        flavor,
        image,
        ssh_key,
    } = settings;

    println!(
        "{}",
        format!("Creating instance '{instance_name}'...").yellow()
    );

    let gateway = OvhClient::new(base.credentials)?;
    probe::preflight(&gateway).await?;

    // Resolution order matters: flavor gates the image listing, and
    // both are region-scoped.
    let project = resolve::resolve_project(&gateway, &base.service_name).await?;
    let region = resolve::resolve_region(&gateway, &project, &region).await?;
    println!("  region: {}", region.cyan());

    let ssh_key = resolve::resolve_ssh_key(&gateway, &project, &ssh_key).await?;
    println!("  ssh key: {} ({})", ssh_key.name.cyan(), ssh_key.id);

    let flavor = resolve::resolve_flavor(&gateway, &project, &region, &flavor).await?;
    println!("  flavor: {} ({})", flavor.name.cyan(), flavor.id);

    let image = resolve::resolve_image(&gateway, &project, &region, &flavor.id, &image).await?;
    println!("  image: {} ({})", image.name.cyan(), image.id);

    let spec = CreateInstance {
        name: instance_name,
        region,
        flavor_id: flavor.id,
        image_id: image.id,
        ssh_key_id: ssh_key.id,
    };
    let instance = transition::create(&gateway, &project, &spec).await?;

    println!();
    println!(
        "{}",
        format!(
            "✓ create requested: {} (id {}, status {})",
            instance.name, instance.id, instance.status
        )
        .green()
        .bold()
    );

    Ok(())
}

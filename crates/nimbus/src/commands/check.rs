use crate::config::Settings;
use colored::Colorize;
use nimbus_cloud::{Result, probe, resolve};
use nimbus_cloud_ovh::OvhClient;

pub async fn handle() -> Result<()> {
    let Settings {
        credentials,
        service_name,
    } = Settings::from_env()?;
    let gateway = OvhClient::new(credentials)?;

    println!("{}", "Probing API connectivity...".cyan());
    let preflight = probe::preflight(&gateway).await?;

    let time = chrono::DateTime::from_timestamp(preflight.server_time, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| preflight.server_time.to_string());
    println!("{} API reachable, server time {}", "✓".green(), time);

    let identity = preflight
        .identity
        .get("nichandle")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    println!("{} credential accepted for {}", "✓".green(), identity.bold());

    let project = resolve::resolve_project(&gateway, &service_name).await?;
    println!("{} project {} accessible", "✓".green(), project.bold());

    Ok(())
}

pub mod check;
pub mod create;
pub mod shelve;
pub mod start;
pub mod status;
pub mod stop;

use colored::Colorize;
use nimbus_cloud::{Instance, InstanceStatus, Outcome};

/// Shared success line for applied transitions.
pub(crate) fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Issued {
            action,
            instance_id,
        } => {
            println!();
            println!(
                "{}",
                format!("✓ {action} requested for instance {instance_id}")
                    .green()
                    .bold()
            );
        }
        Outcome::Skipped(reason) => {
            println!();
            println!("{}", format!("ℹ {reason}").dimmed());
        }
    }
}

/// One-line instance summary with a status-colored tail.
pub(crate) fn print_instance(instance: &Instance) {
    let status = match &instance.status {
        InstanceStatus::Active => instance.status.to_string().green(),
        InstanceStatus::Stopped | InstanceStatus::Shutoff | InstanceStatus::Shelved => {
            instance.status.to_string().yellow()
        }
        InstanceStatus::Other(_) => instance.status.to_string().normal(),
    };
    println!(
        "Found instance {} ({}) status {}",
        instance.name.cyan(),
        instance.id,
        status
    );
}

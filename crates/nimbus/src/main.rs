mod commands;
mod config;
mod report;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(version)]
#[command(about = "Lifecycle control for a single named OVH Public Cloud instance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify API reachability, credential permissions and project access
    Check,
    /// Create the instance, resolving region, SSH key, flavor and image names
    Create,
    /// Start the instance if it is stopped
    Start {
        /// Instance name (defaults to OVH_INSTANCE_NAME)
        instance: Option<String>,
    },
    /// Delete the instance (hard stop); a missing instance is a no-op
    Stop {
        /// Instance name (defaults to OVH_INSTANCE_NAME)
        instance: Option<String>,
    },
    /// Shelve the instance (soft stop), keeping its disk to cut cost
    Shelve {
        /// Instance name (defaults to OVH_INSTANCE_NAME)
        instance: Option<String>,
    },
    /// Show the instance as the provider currently reports it
    Status {
        /// Instance name (defaults to OVH_INSTANCE_NAME)
        instance: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check => commands::check::handle().await,
        Commands::Create => commands::create::handle().await,
        Commands::Start { instance } => commands::start::handle(instance.as_deref()).await,
        Commands::Stop { instance } => commands::stop::handle(instance.as_deref()).await,
        Commands::Shelve { instance } => commands::shelve::handle(instance.as_deref()).await,
        Commands::Status { instance } => commands::status::handle(instance.as_deref()).await,
    };

    if let Err(error) = result {
        report::print_error(&error);
        std::process::exit(1);
    }
}

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vigil::boot::{BootEvent, BootTrigger};
use vigil::presence::LogForegroundHost;
use vigil::settings::{AlwaysGrantedHost, PermissionDecision, PermissionPrompt};
use vigil::supervisor::Supervisor;
use vigil::utils::PidFileGuard;
use vigil::Config;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Minimal background keepalive daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon until interrupted
    Run,
    /// Write the default configuration file
    Onboard,
    /// Request notification permission from the host
    Setup,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) | None => {
            println!("vigil {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Onboard) => {
            let config = Config::default();
            config.save()?;
            println!("Wrote default config to {}", Config::path().display());
        }
        Some(Commands::Setup) => {
            let prompt = PermissionPrompt::new(AlwaysGrantedHost);
            match prompt.request().await {
                PermissionDecision::Granted => println!("Notification permission granted"),
                PermissionDecision::Denied => {
                    println!("Notification permission denied; daemon will still run")
                }
            }
        }
        Some(Commands::Run) => {
            run().await?;
        }
    }

    Ok(())
}

/// Bring the supervisor up via the boot trigger and hold it Active until
/// interrupted.
async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _pidfile = PidFileGuard::acquire()?;

    let supervisor = Arc::new(Supervisor::new(config, Arc::new(LogForegroundHost)));
    let trigger = BootTrigger::new(Arc::clone(&supervisor));

    trigger.on_boot_completed(BootEvent::boot_completed()).await?;

    info!("Daemon running; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    supervisor.deactivate().await;
    Ok(())
}

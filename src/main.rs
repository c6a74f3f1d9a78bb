//! modscope CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "modscope")]
#[command(about = "Live C++ module dependency structure viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Source root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the viewer server, reading analyzer snapshots from stdin
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7891")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Enumerate candidate translation units under the source root
    Scan,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "modscope={log_level},modscope_core={log_level},modscope_analyzer={log_level},modscope_server={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("modscope v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Source root: {}", cli.root.display());

    match cli.command {
        Commands::Serve { port, host } => commands::serve(host, port).await,
        Commands::Scan => commands::scan(cli.root),
        Commands::Version => {
            println!("modscope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

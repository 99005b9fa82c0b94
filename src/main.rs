use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use socialprobe::app::AppContext;
use socialprobe::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;
    let ctx = AppContext::new(config.scraper.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve(ctx, &config.server, host, port).await?;
        }
        Commands::Info { url, platform } => {
            commands::info(&ctx, &url, platform).await?;
        }
        Commands::Screenshot { url, output } => {
            commands::screenshot(&ctx, &url, &output).await?;
        }
    }

    Ok(())
}

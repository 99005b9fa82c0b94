pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Platform;

#[derive(Parser)]
#[command(name = "socialprobe")]
#[command(
    about = "Extract public metadata and screenshots from social media URLs",
    long_about = None
)]
pub struct Cli {
    /// Config file to use instead of ~/.config/socialprobe/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Print extracted metadata for a URL as JSON
    Info {
        /// URL of the profile or post
        url: String,

        /// Treat the URL as this platform instead of detecting it
        #[arg(short, long)]
        platform: Option<Platform>,
    },
    /// Save a mobile screenshot of a URL as PNG
    Screenshot {
        /// URL to capture
        url: String,

        /// Output file
        #[arg(short, long, default_value = "screenshot.png")]
        output: PathBuf,
    },
}

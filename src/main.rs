//! ss-url - Generate Shadowsocks URLs from configuration
//!
//! Prints the `ss://` URL for a server config and optionally renders it as
//! a QR code in the terminal or as PNG/SVG files.

mod commands;
mod logger;

use anyhow::Result;
use clap::Parser;

use commands::{CommandExecutor, GenerateCommand};

/// Generate Shadowsocks URL from configuration
#[derive(Parser)]
#[command(name = "ss-url")]
#[command(version)]
#[command(about = "Generate Shadowsocks URL from configuration")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    generate: GenerateCommand,

    /// Verbose logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        logger::VERBOSE_LEVEL
    } else {
        logger::DEFAULT_LEVEL
    };
    logger::init(level)?;

    cli.generate.execute()
}

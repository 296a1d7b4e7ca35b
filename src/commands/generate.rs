//! Generate command - print the ss:// URL and optional QR codes.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ss_url::{run, Options, QrCodeEmitter};

use super::CommandExecutor;

/// Generate a Shadowsocks URL from a configuration file.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Path to configuration file
    pub config: PathBuf,

    /// Print QR code
    #[arg(short, long)]
    pub qr: bool,

    /// Exclude password field
    #[arg(short, long)]
    pub nopass: bool,

    /// Save QR code as PNG (<server>.png)
    #[arg(short, long)]
    pub png: bool,

    /// Save QR code as SVG (<server>.svg)
    #[arg(short, long)]
    pub svg: bool,

    /// Directory for PNG/SVG files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl GenerateCommand {
    fn options(&self) -> Options {
        Options {
            include_password: !self.nopass,
            terminal_qr: self.qr,
            png: self.png,
            svg: self.svg,
            output_dir: self.output_dir.clone(),
        }
    }
}

impl CommandExecutor for GenerateCommand {
    fn execute(&self) -> Result<()> {
        let emitter = QrCodeEmitter::default();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        run(&self.config, &self.options(), &emitter, &mut out)
            .with_context(|| format!("Failed to generate URL from {}", self.config.display()))?;

        out.flush().context("Failed to flush stdout")?;
        Ok(())
    }
}

//! One run of the tool: config file in, URL and optional QR codes out.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, ServiceConfig};
use crate::encoder::encode_config;
use crate::output::{image_path, write_image, ImageKind, OutputError};
use crate::qr::{QrEmitter, QrError};

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Qr(#[from] QrError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Cannot write to output stream: {0}")]
    Io(#[from] std::io::Error),
}

/// What a run should produce besides the URL.
#[derive(Debug, Clone)]
pub struct Options {
    pub include_password: bool,
    pub terminal_qr: bool,
    pub png: bool,
    pub svg: bool,
    /// Directory for image files.
    pub output_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_password: true,
            terminal_qr: false,
            png: false,
            svg: false,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub url: String,
    /// Image files written, PNG before SVG.
    pub saved: Vec<PathBuf>,
}

/// Loads the config, encodes the URL and emits every requested output.
///
/// All fallible work happens before anything is printed. The config is
/// loaded and validated, every requested form is rendered (the terminal
/// art into a buffer) and the image files are written. Only then is `out`
/// touched: first the URL, then the terminal QR code, then one
/// `Saved to <path>` line per image.
///
/// # Arguments
/// * `config_path` - JSON server configuration file
/// * `options` - Password inclusion and the outputs to produce
/// * `emitter` - QR code renderer
/// * `out` - Destination for the URL, terminal QR and save notices
///
/// # Returns
/// The URL and the paths of the written images.
pub fn run(
    config_path: &Path,
    options: &Options,
    emitter: &dyn QrEmitter,
    out: &mut dyn Write,
) -> Result<Report, PipelineError> {
    let config = ServiceConfig::load(config_path, options.include_password)?;
    debug!(
        server = %config.server,
        port = %config.server_port,
        include_password = options.include_password,
        "loaded config"
    );

    let url = encode_config(&config, options.include_password);

    let terminal = if options.terminal_qr {
        let mut art = Vec::new();
        emitter.render_terminal(&url, &mut art)?;
        Some(art)
    } else {
        None
    };

    let mut images = Vec::new();
    if options.png {
        let path = image_path(&options.output_dir, &config.server, ImageKind::Png)?;
        images.push((path, emitter.render_raster(&url)?));
    }
    if options.svg {
        let path = image_path(&options.output_dir, &config.server, ImageKind::Svg)?;
        images.push((path, emitter.render_vector(&url)?));
    }

    let mut saved = Vec::with_capacity(images.len());
    for (path, bytes) in images {
        write_image(&path, &bytes)?;
        saved.push(path);
    }

    writeln!(out, "{}", url)?;
    if let Some(art) = terminal {
        out.write_all(&art)?;
    }
    for path in &saved {
        writeln!(out, "Saved to {}", path.display())?;
    }

    Ok(Report { url, saved })
}

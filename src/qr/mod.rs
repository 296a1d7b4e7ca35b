//! QR code rendering for `ss://` URLs.
//!
//! The rest of the crate talks to [`QrEmitter`] only; [`QrCodeEmitter`] is
//! the implementation backed by the `qrcode` and `image` crates.

mod generator;
mod reader;

use std::io::Write;
use thiserror::Error;

pub use generator::{QrCodeEmitter, QrConfig};
pub use reader::{read_qr, read_qr_from_file};

/// Errors that can occur during QR code operations.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR code generation failed: {0}")]
    Generation(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("QR code read error: {0}")]
    Read(String),

    #[error("No QR code found in image")]
    NoQrCodeFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders text as a QR code in the three supported forms.
pub trait QrEmitter {
    /// Writes the code as text art suitable for a terminal.
    fn render_terminal(&self, text: &str, out: &mut dyn Write) -> Result<(), QrError>;

    /// Returns the code as an encoded PNG image.
    fn render_raster(&self, text: &str) -> Result<Vec<u8>, QrError>;

    /// Returns the code as an SVG document.
    fn render_vector(&self, text: &str) -> Result<Vec<u8>, QrError>;
}

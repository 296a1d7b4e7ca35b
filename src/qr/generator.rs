//! QR code generation using the `qrcode` crate.

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};
use std::io::{Cursor, Write};
use tracing::debug;

use super::{QrEmitter, QrError};

/// Configuration for QR code generation.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Error correction level (default: Medium)
    pub ec_level: EcLevel,
    /// Module size in pixels for PNG output (default: 10)
    pub module_size: u32,
    /// Draw the quiet zone border (default: true)
    pub quiet_zone: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            module_size: 10,
            quiet_zone: true,
        }
    }
}

/// [`QrEmitter`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Default)]
pub struct QrCodeEmitter {
    config: QrConfig,
}

impl QrCodeEmitter {
    pub fn new(config: QrConfig) -> Self {
        Self { config }
    }

    fn code(&self, text: &str) -> Result<QrCode, QrError> {
        let qr = QrCode::with_error_correction_level(text, self.config.ec_level)
            .map_err(|e| QrError::Generation(e.to_string()))?;
        debug!(width = qr.width(), "built QR matrix");
        Ok(qr)
    }
}

impl QrEmitter for QrCodeEmitter {
    fn render_terminal(&self, text: &str, out: &mut dyn Write) -> Result<(), QrError> {
        let qr = self.code(text)?;
        // Colors are swapped so the code scans on dark terminal backgrounds.
        let art = qr
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(self.config.quiet_zone)
            .build();

        writeln!(out, "{}", art)?;
        Ok(())
    }

    fn render_raster(&self, text: &str) -> Result<Vec<u8>, QrError> {
        let qr = self.code(text)?;
        let image = qr
            .render::<Luma<u8>>()
            .quiet_zone(self.config.quiet_zone)
            .module_dimensions(self.config.module_size, self.config.module_size)
            .build();

        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(image)
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| QrError::Encode(e.to_string()))?;

        Ok(png.into_inner())
    }

    fn render_vector(&self, text: &str) -> Result<Vec<u8>, QrError> {
        let qr = self.code(text)?;
        let svg_string = qr
            .render()
            .min_dimensions(200, 200)
            .quiet_zone(self.config.quiet_zone)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(svg_string.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "ss://YWVzLTI1Ni1nY206aHVudGVyMkAxLjIuMy40OjgzODg=";

    #[test]
    fn test_render_terminal() {
        let emitter = QrCodeEmitter::default();
        let mut out = Vec::new();
        emitter.render_terminal(URL, &mut out).unwrap();

        let art = String::from_utf8(out).unwrap();
        assert!(art.ends_with('\n'));
        assert!(art.lines().count() > 10);
        assert!(art.contains('█') || art.contains('▀') || art.contains('▄'));
    }

    #[test]
    fn test_render_raster_is_png() {
        let emitter = QrCodeEmitter::default();
        let png = emitter.render_raster(URL).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_vector_is_svg() {
        let emitter = QrCodeEmitter::default();
        let svg = String::from_utf8(emitter.render_vector(URL).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_module_size_scales_raster() {
        let small = QrCodeEmitter::new(QrConfig {
            module_size: 2,
            ..Default::default()
        });
        let large = QrCodeEmitter::default();

        let small_img = image::load_from_memory(&small.render_raster(URL).unwrap()).unwrap();
        let large_img = image::load_from_memory(&large.render_raster(URL).unwrap()).unwrap();
        assert_eq!(large_img.width(), small_img.width() * 5);
    }

    #[test]
    fn test_text_too_large() {
        let emitter = QrCodeEmitter::default();
        let huge = "A".repeat(10_000);
        assert!(matches!(
            emitter.render_raster(&huge),
            Err(QrError::Generation(_))
        ));
    }
}

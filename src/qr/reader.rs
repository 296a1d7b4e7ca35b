//! QR code reading.
//!
//! Used to check that a rendered image scans back to the original text.

use image::DynamicImage;
use rqrr::PreparedImage;
use std::path::Path;

use super::QrError;

/// Reads the first QR code in an image and returns its text.
///
/// # Arguments
/// * `image` - The image containing the QR code
///
/// # Returns
/// The text stored in the QR code (an `ss://` URL for images this crate writes).
pub fn read_qr(image: &DynamicImage) -> Result<String, QrError> {
    let gray = image.to_luma8();
    let mut prepared = PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    let grid = grids.first().ok_or(QrError::NoQrCodeFound)?;

    let (_, content) = grid
        .decode()
        .map_err(|e| QrError::Read(format!("Failed to decode QR: {:?}", e)))?;

    Ok(content)
}

/// Reads a QR code from an image file.
///
/// # Arguments
/// * `path` - Path to the image file containing the QR code
pub fn read_qr_from_file<P: AsRef<Path>>(path: P) -> Result<String, QrError> {
    let image = image::open(path).map_err(|e| QrError::Read(e.to_string()))?;
    read_qr(&image)
}

//! Image file output.
//!
//! Images are named after the server: `1.2.3.4.png`, `example.com.svg`.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while writing image files.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Server name {0:?} cannot be used as a file name")]
    InvalidFileName(String),

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Image file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Svg,
}

impl ImageKind {
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Svg => "svg",
        }
    }
}

/// Returns `<dir>/<server>.<ext>`.
///
/// The server must be a plain file name: path separators, `.` and `..`
/// are rejected so the image always lands inside `dir`.
///
/// # Arguments
/// * `dir` - Output directory
/// * `server` - Server field of the config, used as the base name
/// * `kind` - Image format, selects the extension
pub fn image_path(dir: &Path, server: &str, kind: ImageKind) -> Result<PathBuf, OutputError> {
    let unsafe_name = server.is_empty()
        || server == "."
        || server == ".."
        || server.contains('/')
        || server.contains('\\')
        || server.contains('\0');
    if unsafe_name {
        return Err(OutputError::InvalidFileName(server.to_string()));
    }

    Ok(dir.join(format!("{}.{}", server, kind.extension())))
}

/// Writes image bytes, replacing any existing file.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    fs::write(path, bytes).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_image_path_names() {
        let dir = Path::new("out");
        assert_eq!(
            image_path(dir, "1.2.3.4", ImageKind::Png).unwrap(),
            PathBuf::from("out/1.2.3.4.png")
        );
        assert_eq!(
            image_path(dir, "example.com", ImageKind::Svg).unwrap(),
            PathBuf::from("out/example.com.svg")
        );
    }

    #[test]
    fn test_image_path_rejects_traversal() {
        for bad in ["", ".", "..", "../etc/passwd", "a/b", "a\\b"] {
            assert!(
                matches!(
                    image_path(Path::new("."), bad, ImageKind::Png),
                    Err(OutputError::InvalidFileName(_))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_write_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("host.svg");
        write_image(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_write_image_unwritable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("host.png");
        let err = write_image(&path, b"data").unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
        assert!(err.to_string().contains("host.png"));
    }
}

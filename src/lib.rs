//! # ss-url - Shadowsocks URL and QR code generator
//!
//! Reads a Shadowsocks server configuration (JSON) and turns it into a
//! single-line `ss://` URL that clients can import, optionally rendered as
//! a QR code in the terminal, as PNG or as SVG.
//!
//! ## URL format
//!
//! ```text
//! ss:// + base64("method:password@server:port")
//! ```
//!
//! Standard Base64 alphabet with padding. Nothing is escaped. With the
//! password excluded the payload keeps an empty password segment
//! (`method:@server:port`).
//!
//! ## Example Usage
//!
//! ```rust
//! use ss_url::{encode_config, ServiceConfig};
//!
//! let config = ServiceConfig {
//!     method: "aes-256-gcm".to_string(),
//!     password: "hunter2".to_string(),
//!     server: "1.2.3.4".to_string(),
//!     server_port: 8388.into(),
//! };
//!
//! let url = encode_config(&config, true);
//! assert_eq!(url, "ss://YWVzLTI1Ni1nY206aHVudGVyMkAxLjIuMy40OjgzODg=");
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Loading and validating the server configuration
//! - [`encoder`]: `ss://` URL encoding and decoding
//! - [`qr`]: QR code rendering (terminal, PNG, SVG) and reading
//! - [`output`]: Image file naming and writing
//! - [`pipeline`]: A complete config-to-output run

pub mod config;
pub mod encoder;
pub mod output;
pub mod pipeline;
pub mod qr;

// Re-export commonly used types at the crate root
pub use config::{load_record, ConfigError, ConfigRecord, Port, ServiceConfig};
pub use encoder::{decode_url, encode_config, encode_url, payload, UrlError, SCHEME};
pub use output::{image_path, write_image, ImageKind, OutputError};
pub use pipeline::{run, Options, PipelineError, Report};
pub use qr::{QrCodeEmitter, QrConfig, QrEmitter, QrError};

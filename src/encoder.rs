//! `ss://` URL encoding.
//!
//! The URL is the legacy Shadowsocks form: the scheme followed by the
//! standard, padded Base64 of `method:password@server:port`. Fields are
//! concatenated literally, nothing is escaped.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

use crate::config::{Port, ServiceConfig};

/// URL scheme prefix.
pub const SCHEME: &str = "ss://";

/// Decoder that accepts the payload with or without trailing `=`.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors that can occur when parsing an `ss://` URL.
#[derive(Error, Debug)]
pub enum UrlError {
    #[error("URL does not start with ss://")]
    MissingScheme,

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

/// Builds the plaintext payload `method:password@server:port`.
pub fn payload(config: &ServiceConfig) -> String {
    format!(
        "{}:{}@{}:{}",
        config.method, config.password, config.server, config.server_port
    )
}

/// Encodes a config into an `ss://` URL, password included as stored.
pub fn encode_url(config: &ServiceConfig) -> String {
    let plain = payload(config);
    debug!(len = plain.len(), "encoding payload");
    format!("{}{}", SCHEME, BASE64.encode(plain.as_bytes()))
}

/// Encodes a config, leaving the password segment empty unless requested.
///
/// The input config is never modified.
pub fn encode_config(config: &ServiceConfig, include_password: bool) -> String {
    if include_password {
        encode_url(config)
    } else {
        encode_url(&config.without_password())
    }
}

/// Parses an `ss://` URL back into its connection parameters.
///
/// A trailing `#tag` is ignored. The password may contain `:` and `@`;
/// the method may not contain `:`.
pub fn decode_url(url: &str) -> Result<ServiceConfig, UrlError> {
    let encoded = url.strip_prefix(SCHEME).ok_or(UrlError::MissingScheme)?;
    let encoded = match encoded.split_once('#') {
        Some((body, _tag)) => body,
        None => encoded,
    };

    let plain = String::from_utf8(LENIENT_BASE64.decode(encoded.trim())?)?;

    let (userinfo, hostport) = plain
        .rsplit_once('@')
        .ok_or_else(|| UrlError::Malformed("missing '@'".to_string()))?;
    let (method, password) = userinfo
        .split_once(':')
        .ok_or_else(|| UrlError::Malformed("missing ':' after method".to_string()))?;
    let (server, port) = hostport
        .rsplit_once(':')
        .ok_or_else(|| UrlError::Malformed("missing port".to_string()))?;

    if server.is_empty() {
        return Err(UrlError::Malformed("empty server".to_string()));
    }
    let server_port =
        Port::parse(port).ok_or_else(|| UrlError::InvalidPort(port.to_string()))?;

    Ok(ServiceConfig {
        method: method.to_string(),
        password: password.to_string(),
        server: server.to_string(),
        server_port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ServiceConfig {
        ServiceConfig {
            method: "aes-256-gcm".to_string(),
            password: "hunter2".to_string(),
            server: "1.2.3.4".to_string(),
            server_port: 8388.into(),
        }
    }

    fn decoded_payload(url: &str) -> String {
        let body = url.strip_prefix(SCHEME).unwrap();
        String::from_utf8(BASE64.decode(body).unwrap()).unwrap()
    }

    #[test]
    fn test_payload_format() {
        assert_eq!(payload(&sample()), "aes-256-gcm:hunter2@1.2.3.4:8388");
    }

    #[test]
    fn test_encode_with_password() {
        let url = encode_url(&sample());
        assert_eq!(url, "ss://YWVzLTI1Ni1nY206aHVudGVyMkAxLjIuMy40OjgzODg=");
        assert_eq!(decoded_payload(&url), "aes-256-gcm:hunter2@1.2.3.4:8388");
    }

    #[test]
    fn test_encode_without_password() {
        let config = sample();
        let url = encode_config(&config, false);
        assert_eq!(decoded_payload(&url), "aes-256-gcm:@1.2.3.4:8388");
        // Source config is untouched
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let config = sample();
        assert_eq!(encode_config(&config, true), encode_config(&config, true));
        assert_eq!(encode_config(&config, false), encode_config(&config, false));
    }

    #[test]
    fn test_fields_not_escaped() {
        let config = ServiceConfig {
            method: "rc4-md5".to_string(),
            password: "p@ss:w/rd #1".to_string(),
            server: "example.com".to_string(),
            server_port: 443.into(),
        };
        let url = encode_url(&config);
        assert_eq!(decoded_payload(&url), "rc4-md5:p@ss:w/rd #1@example.com:443");
    }

    #[test]
    fn test_port_digits_passed_through() {
        let config = ServiceConfig {
            method: "m".to_string(),
            password: "p".to_string(),
            server: "h".to_string(),
            server_port: Port::parse("0443").unwrap(),
        };
        let url = encode_url(&config);
        assert_eq!(url, "ss://bTpwQGg6MDQ0Mw==");
        assert_eq!(decode_url(&url).unwrap(), config);
    }

    #[test]
    fn test_decode_roundtrip_tricky_password() {
        let config = ServiceConfig {
            method: "chacha20-ietf-poly1305".to_string(),
            password: "a:b@c".to_string(),
            server: "::1".to_string(),
            server_port: 1080.into(),
        };
        assert_eq!(decode_url(&encode_url(&config)).unwrap(), config);
    }

    #[test]
    fn test_decode_ignores_tag_and_padding() {
        let url = "ss://YWVzLTI1Ni1nY206aHVudGVyMkAxLjIuMy40OjgzODg#home";
        assert_eq!(decode_url(url).unwrap(), sample());
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_url("http://abc"), Err(UrlError::MissingScheme)));
        assert!(matches!(decode_url("ss://!!!"), Err(UrlError::Base64(_))));

        let no_at = format!("{}{}", SCHEME, BASE64.encode("aes-256-gcm:pw"));
        assert!(matches!(decode_url(&no_at), Err(UrlError::Malformed(_))));

        let bad_port = format!("{}{}", SCHEME, BASE64.encode("m:p@host:99999"));
        assert!(matches!(decode_url(&bad_port), Err(UrlError::InvalidPort(_))));
    }
}

// src/github/readme.rs
// =============================================================================
// README retrieval modes and base64 decoding.
//
// GitHub serves a README two ways from the same endpoint, chosen by the
// Accept header:
// - raw:  "application/vnd.github.v3.raw" returns the file body as-is
// - json: "application/vnd.github+json" returns an envelope whose `content`
//         field holds the file as base64 (wrapped at 60 columns)
//
// Decoding is lossy on purpose: bytes that are not valid UTF-8 become U+FFFD
// instead of failing the whole README. Only broken base64 is an error.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const ACCEPT_JSON: &str = "application/vnd.github+json";
pub const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadmeMode {
    /// Plain text body
    Raw,
    /// JSON envelope with base64 content, decoded locally
    Json,
}

impl ReadmeMode {
    pub fn from_raw_flag(raw: bool) -> Self {
        if raw {
            ReadmeMode::Raw
        } else {
            ReadmeMode::Json
        }
    }

    pub fn is_raw(self) -> bool {
        self == ReadmeMode::Raw
    }

    pub fn accept_header(self) -> &'static str {
        match self {
            ReadmeMode::Raw => ACCEPT_RAW,
            ReadmeMode::Json => ACCEPT_JSON,
        }
    }
}

/// Decodes the `content` field of a README envelope into text.
///
/// Whitespace is stripped first because GitHub line-wraps the payload.
pub fn decode_content(content: &str) -> Result<String, base64::DecodeError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hello() {
        assert_eq!(decode_content("SGVsbG8=").unwrap(), "Hello");
    }

    #[test]
    fn test_decode_wrapped_payload() {
        // "# Title\n\nSome text" split the way GitHub wraps it
        let wrapped = "IyBUaXRsZQoKU29t\nZSB0ZXh0\n";
        assert_eq!(decode_content(wrapped).unwrap(), "# Title\n\nSome text");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        // 0x48 0x69 0xFF 0x21 -> "Hi\u{FFFD}!"
        let encoded = STANDARD.encode([0x48, 0x69, 0xFF, 0x21]);
        assert_eq!(decode_content(&encoded).unwrap(), "Hi\u{FFFD}!");
    }

    #[test]
    fn test_empty_content_is_empty_text() {
        assert_eq!(decode_content("").unwrap(), "");
    }

    #[test]
    fn test_broken_base64_is_an_error() {
        assert!(decode_content("not*base64!").is_err());
    }

    #[test]
    fn test_mode_headers() {
        assert_eq!(ReadmeMode::from_raw_flag(true).accept_header(), ACCEPT_RAW);
        assert_eq!(ReadmeMode::from_raw_flag(false).accept_header(), ACCEPT_JSON);
    }
}

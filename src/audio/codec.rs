//! Base64 envelope for binary audio and `data:` URIs.
//!
//! The generative API exchanges audio as standard-alphabet, padded, unwrapped
//! base64 text, and the exported quiz embeds its audio the same way inside a
//! data URI. Nothing here interprets the bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The text is not valid standard base64.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// The string is not a `data:<mime>;base64,<payload>` URI.
    #[error("malformed data URI: {0}")]
    MalformedDataUri(&'static str),
}

/// Encode `bytes` as standard padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64 text.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}

/// Build `data:<mime>;base64,<payload>` for `bytes`.
pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", encode(bytes))
}

/// Split a base64 data URI into its MIME type and decoded bytes.
pub fn from_data_uri(uri: &str) -> Result<(String, Vec<u8>), CodecError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or(CodecError::MalformedDataUri("missing `data:` scheme"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or(CodecError::MalformedDataUri("missing `,` separator"))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or(CodecError::MalformedDataUri("payload is not base64"))?;

    Ok((mime.to_string(), decode(payload)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(decode("Zm9vYmFy").unwrap(), b"foobar");
    }

    #[test]
    fn arbitrary_bytes_survive() {
        let bytes: Vec<u8> = (0..=255u8).rev().chain(0..=255u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn output_is_not_wrapped_or_url_safe() {
        let encoded = encode(&[0xfb; 200]);
        assert!(!encoded.contains('\n'));
        assert!(encoded.contains('+') || encoded.contains('/'));
        assert!(!encoded.contains('-') && !encoded.contains('_'));
    }

    #[test]
    fn invalid_text_is_an_error() {
        assert!(matches!(decode("not base64!"), Err(CodecError::InvalidBase64(_))));
    }

    #[test]
    fn data_uri_round_trip() {
        let uri = to_data_uri("audio/wav", &[1, 2, 3]);
        assert_eq!(uri, "data:audio/wav;base64,AQID");

        let (mime, bytes) = from_data_uri(&uri).unwrap();
        assert_eq!(mime, "audio/wav");
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn data_uri_without_base64_marker_is_rejected() {
        assert!(matches!(
            from_data_uri("data:text/plain,hello"),
            Err(CodecError::MalformedDataUri(_))
        ));
        assert!(matches!(
            from_data_uri("blob:abc"),
            Err(CodecError::MalformedDataUri(_))
        ));
    }
}

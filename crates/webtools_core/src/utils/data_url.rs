//! Base64 data URL encoding and decoding.
//!
//! A data URL looks like `data:image/png;base64,iVBORw0KGgo...`. Decoding gives
//! back the mime type and raw bytes a browser `Blob` is built from; encoding is
//! what `FileReader.readAsDataURL` produces for a file.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Result, ToolsError};

/// Mime type used when a file reports none.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Decoded contents of a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlob {
    /// Mime type from the URL header, e.g. `image/png`.
    pub mime: String,
    /// Decoded payload.
    pub bytes: Vec<u8>,
}

/// Decode a `data:<mime>;base64,<payload>` URL.
///
/// The mime type is the text between the first `:` and the following `;` of
/// the header; anything after that `;` (parameters, the `base64` marker) is
/// ignored.
pub fn decode_data_url(data_url: &str) -> Result<DataBlob> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| ToolsError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let mime = header
        .split_once(':')
        .and_then(|(_, rest)| rest.split_once(';'))
        .map(|(mime, _)| mime.to_string())
        .ok_or_else(|| ToolsError::InvalidDataUrl(format!("no mime type in header '{header}'")))?;

    // Only the first comma separates; a second one ends the payload.
    let payload = payload.split(',').next().unwrap_or_default();
    let bytes = STANDARD.decode(payload)?;
    log::trace!("Decoded data URL: {} bytes of {}", bytes.len(), mime);

    Ok(DataBlob { mime, bytes })
}

/// Encode bytes as a `data:<mime>;base64,<payload>` URL.
///
/// An empty `mime` becomes [`FALLBACK_MIME`].
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

//! Inline `data:` URIs for image bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Build `data:image/<extension>;base64,<payload>`.
///
/// The extension is used as written (`png`, `svg`, `jpg`...).
pub fn image_data_uri(extension: &str, bytes: &[u8]) -> String {
    format!("data:image/{extension};base64,{}", STANDARD.encode(bytes))
}

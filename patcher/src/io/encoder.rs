//! Image files as inline data URIs.

use std::fs;
use std::path::Path;

use tracing::{debug, error};

use crate::core::data_uri::image_data_uri;

/// Read `path` and encode it as `data:image/<ext>;base64,...`.
///
/// Returns `None` (after logging the cause) when the file cannot be read or
/// has no extension; callers skip whatever needed the image.
pub fn image_to_data_uri(path: &Path) -> Option<String> {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        error!("cannot encode {}: file has no extension", path.display());
        return None;
    };
    match fs::read(path) {
        Ok(bytes) => {
            debug!(file = %path.display(), bytes = bytes.len(), "encoded image");
            Some(image_data_uri(extension, &bytes))
        }
        Err(err) => {
            error!("error converting {} to base64: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_extension_prefix() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("logo-login.png");
        fs::write(&path, b"png-bytes").expect("write");

        let uri = image_to_data_uri(&path).expect("encoded");
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn missing_file_yields_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(image_to_data_uri(&temp.path().join("logo.png")), None);
    }

    #[test]
    fn extensionless_file_yields_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("logo");
        fs::write(&path, b"bytes").expect("write");
        assert_eq!(image_to_data_uri(&path), None);
    }
}

//! Image format detection and image reference validation.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

/// Raster formats that can be scaled to print size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG (JFIF or EXIF)
    Jpeg,
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// PNG magic bytes.
pub(crate) const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// JPEG start-of-image marker.
const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Detect the image format from a file name.
///
/// Only `.png`, `.jpg` and `.jpeg` are accepted, case-insensitively.
///
/// # Example
/// ```
/// use mdprint::detect::{detect_format_from_extension, ImageFormat};
///
/// assert_eq!(detect_format_from_extension("figures/plot.PNG"), Some(ImageFormat::Png));
/// assert_eq!(detect_format_from_extension("photo.gif"), None);
/// ```
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
    let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        _ => None,
    }
}

/// Detect the image format from the leading bytes of the data.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImageFormat> {
    if data.starts_with(PNG_SIGNATURE) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(JPEG_SOI) {
        return Ok(ImageFormat::Jpeg);
    }
    Err(Error::UnsupportedImage(format!(
        "unrecognized magic bytes {:02X?}",
        &data[..data.len().min(4)]
    )))
}

/// Detect the image format by sniffing the beginning of a file.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(PNG_SIGNATURE.len());
    reader
        .by_ref()
        .take(PNG_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Check whether an image reference carries a URL scheme (`scheme://...`).
///
/// Such references are never fetched.
pub fn is_remote_url(src: &str) -> bool {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME
        .get_or_init(|| Regex::new(r"^\w+://").expect("scheme pattern is valid"))
        .is_match(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(detect_format_from_extension("a.png"), Some(ImageFormat::Png));
        assert_eq!(detect_format_from_extension("a.Jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(detect_format_from_extension("a.JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(detect_format_from_extension("a.svg"), None);
        assert_eq!(detect_format_from_extension("no_extension"), None);
    }

    #[test]
    fn test_magic_detection() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(detect_format_from_bytes(&png).unwrap(), ImageFormat::Png);

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(detect_format_from_bytes(&jpeg).unwrap(), ImageFormat::Jpeg);

        let result = detect_format_from_bytes(b"GIF89a");
        assert!(matches!(result, Err(Error::UnsupportedImage(_))));

        let result = detect_format_from_bytes(&[]);
        assert!(matches!(result, Err(Error::UnsupportedImage(_))));
    }

    #[test]
    fn test_remote_url() {
        assert!(is_remote_url("https://example.com/a.png"));
        assert!(is_remote_url("file:///tmp/a.png"));
        assert!(is_remote_url("ftp://host/a.jpg"));
        assert!(!is_remote_url("images/a.png"));
        assert!(!is_remote_url("/images/a.png"));
        assert!(!is_remote_url("C:\\images\\a.png"));
    }
}

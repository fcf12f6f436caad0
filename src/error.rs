//! Error types for mdprint library.

use crate::image::DecodeError;
use std::io;
use thiserror::Error;

/// Result type alias for mdprint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a print tree.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The image byte stream does not follow PNG/JPEG framing.
    #[error("Image decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Image references with a URL scheme are not fetched.
    #[error("We cannot accept image URLs at this time: {0}")]
    RemoteImage(String),

    /// A relative image path was found but no base directory was configured.
    #[error("No base path for images was specified")]
    MissingBaseDir,

    /// The image file is neither PNG nor JPEG.
    #[error("Image file format is wrong, expected JPEG or PNG: {0}")]
    UnsupportedImage(String),

    /// The decoded dimensions cannot be converted to print size.
    #[error("Could not read the picture's dimensions: [{width}, {height}, {dpi}]")]
    InvalidDimensions {
        /// Width in pixels
        width: f32,
        /// Height in pixels
        height: f32,
        /// Resolution in dots per inch
        dpi: f32,
    },

    /// Invalid configuration value (page size, margins, image size).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input element tree could not be read.
    #[error("Element tree parsing error: {0}")]
    TreeParse(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::TreeParse(err.to_string())
    }
}

impl Error {
    /// Check if this error was produced while loading a single image.
    ///
    /// Image errors are recovered by the walker and never abort a document.
    pub fn is_image_error(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Decode(_)
                | Error::RemoteImage(_)
                | Error::MissingBaseDir
                | Error::UnsupportedImage(_)
                | Error::InvalidDimensions { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingBaseDir;
        assert_eq!(err.to_string(), "No base path for images was specified");

        let err = Error::RemoteImage("https://example.com/a.png".into());
        assert_eq!(
            err.to_string(),
            "We cannot accept image URLs at this time: https://example.com/a.png"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_image_error());
    }

    #[test]
    fn test_decode_error_conversion() {
        let err: Error = DecodeError::InvalidSignature.into();
        assert!(matches!(err, Error::Decode(DecodeError::InvalidSignature)));
        assert!(err.is_image_error());
        assert!(!Error::InvalidConfig("x".into()).is_image_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, Error::TreeParse(_)));
    }
}

//! Raster image metadata readers.
//!
//! Only the pieces of a PNG or JPEG stream needed to size an image for print
//! are decoded: pixel width, pixel height and resolution. Pixel data is never
//! touched.

mod jpeg;
mod png;
mod size;
mod tiff;

pub use jpeg::{read_jpeg, JpegMarkerIter, JpegSegment};
pub use png::{read_png, PngChunk, PngChunkIter};
pub use size::{available_width, clamp_width, to_points};

use crate::detect::{detect_format_from_extension, ImageFormat};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Resolution assumed when an image carries no density information.
pub const DEFAULT_DPI: u32 = 96;

/// Resolution used when a density block is present but its unit is unknown.
pub const UNITLESS_DPI: u32 = 72;

/// Pixel dimensions and resolution of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Dots per inch
    pub dpi: u32,
}

impl ImageInfo {
    /// Create image info from its parts.
    pub fn new(width: u32, height: u32, dpi: u32) -> Self {
        Self { width, height, dpi }
    }

    /// Size in points (1/72 inch), or `None` if it cannot be computed.
    pub fn print_size(&self) -> Option<(f32, f32)> {
        to_points(self.width as f32, self.height as f32, self.dpi as f32)
    }
}

/// Partially discovered metadata while scanning a stream.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Discovery {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub dpi: Option<u32>,
}

impl Discovery {
    /// All three values are known (zero counts as unknown).
    pub fn is_complete(&self) -> bool {
        [self.width, self.height, self.dpi]
            .iter()
            .all(|v| matches!(v, Some(n) if *n > 0))
    }

    /// Apply the screen-resolution default and require both dimensions.
    pub fn finish(self) -> std::result::Result<ImageInfo, DecodeError> {
        let dpi = self.dpi.filter(|dpi| *dpi > 0).unwrap_or(DEFAULT_DPI);
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok(ImageInfo { width, height, dpi }),
            _ => Err(DecodeError::MissingDimensions),
        }
    }
}

/// Errors raised while walking PNG chunks or JPEG markers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream does not start with the PNG signature.
    #[error("Invalid PNG signature")]
    InvalidSignature,

    /// A JPEG marker did not start with 0xFF.
    #[error("Invalid marker 0x{found:02X} at offset {offset}, JPEG file is likely corrupted")]
    InvalidMarker {
        /// Byte offset of the bad marker
        offset: usize,
        /// Byte found instead of 0xFF
        found: u8,
    },

    /// A fixed-width field extends past the end of the buffer.
    #[error("Truncated data: {needed} bytes needed at offset {offset}")]
    Truncated {
        /// Offset of the field
        offset: usize,
        /// Width of the field in bytes
        needed: usize,
    },

    /// A JPEG segment declares a length too small to hold its own length field.
    #[error("Invalid segment length {length} at offset {offset}")]
    InvalidSegmentLength {
        /// Offset of the length field
        offset: usize,
        /// Declared length
        length: u16,
    },

    /// No width/height was found before the scan ended.
    #[error("Image dimensions not found")]
    MissingDimensions,
}

/// Borrow `len` bytes at `offset`, failing with [`DecodeError::Truncated`].
pub(crate) fn field(data: &[u8], offset: usize, len: usize) -> std::result::Result<&[u8], DecodeError> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(DecodeError::Truncated {
            offset,
            needed: len,
        })
}

/// Borrow `data[start..end]`, clamping both ends to the buffer.
pub(crate) fn clamped(data: &[u8], start: usize, end: usize) -> &[u8] {
    let start = start.min(data.len());
    let end = end.clamp(start, data.len());
    &data[start..end]
}

/// Read an image file and decode its metadata according to its extension.
///
/// # Example
///
/// ```no_run
/// let info = mdprint::image::read_image_file("figures/plot.png")?;
/// println!("{}x{} @ {} dpi", info.width, info.height, info.dpi);
/// # Ok::<(), mdprint::Error>(())
/// ```
pub fn read_image_file<P: AsRef<Path>>(path: P) -> Result<ImageInfo> {
    let path = path.as_ref();
    let format = detect_format_from_extension(path)
        .ok_or_else(|| Error::UnsupportedImage(path.display().to_string()))?;
    let data = std::fs::read(path)?;
    read_image_bytes(&data, format)
}

/// Decode metadata from bytes of a known format.
pub fn read_image_bytes(data: &[u8], format: ImageFormat) -> Result<ImageInfo> {
    let info = match format {
        ImageFormat::Png => read_png(data)?,
        ImageFormat::Jpeg => read_jpeg(data)?,
    };
    Ok(info)
}

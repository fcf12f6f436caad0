//! PNG chunk stream reader.

use super::{clamped, field, DecodeError, Discovery, ImageInfo, UNITLESS_DPI};
use crate::detect::PNG_SIGNATURE;
use byteorder::{BigEndian, ByteOrder};

/// pHYs unit flag for "pixels per meter".
const UNIT_METER: u8 = 1;
const INCHES_PER_METER: f64 = 0.0254;

/// A raw chunk from a PNG stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngChunk<'b> {
    /// Four ASCII type bytes, e.g. `IHDR`
    pub kind: [u8; 4],
    /// Chunk payload
    pub data: &'b [u8],
}

impl PngChunk<'_> {
    /// Chunk type as text.
    pub fn kind_str(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }
}

/// Iterator over the chunks following the 8-byte PNG signature.
///
/// Each chunk is `[length][type][data][crc]`. The length field must be
/// complete; type, data and CRC are clamped to the end of the buffer.
#[derive(Debug, Clone)]
pub struct PngChunkIter<'b> {
    data: &'b [u8],
    offset: usize,
}

impl<'b> PngChunkIter<'b> {
    /// Start iterating after the signature. The signature itself is not checked.
    pub fn new(data: &'b [u8]) -> Self {
        Self {
            data,
            offset: PNG_SIGNATURE.len(),
        }
    }
}

impl<'b> Iterator for PngChunkIter<'b> {
    type Item = Result<PngChunk<'b>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.data.len() {
            return None;
        }

        let length = match field(self.data, self.offset, 4) {
            Ok(bytes) => BigEndian::read_u32(bytes) as usize,
            Err(e) => {
                self.offset = self.data.len();
                return Some(Err(e));
            }
        };
        let type_start = self.offset + 4;
        let data_start = self.offset + 8;
        let data_end = data_start.saturating_add(length);
        let crc_end = data_end.saturating_add(4);

        let mut kind = [0u8; 4];
        let type_bytes = clamped(self.data, type_start, data_start);
        kind[..type_bytes.len()].copy_from_slice(type_bytes);

        let chunk = PngChunk {
            kind,
            data: clamped(self.data, data_start, data_end),
        };
        self.offset = crc_end;
        Some(Ok(chunk))
    }
}

/// Decode width, height and resolution from PNG bytes.
///
/// Resolution comes from the `pHYs` chunk: meters are converted to inches,
/// any other unit yields 72 dpi. Without a `pHYs` chunk the result is 96 dpi.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("diagram.png")?;
/// let info = mdprint::image::read_png(&data)?;
/// assert!(info.dpi > 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_png(data: &[u8]) -> Result<ImageInfo, DecodeError> {
    if !data.starts_with(PNG_SIGNATURE) {
        return Err(DecodeError::InvalidSignature);
    }

    let mut found = Discovery::default();
    for chunk in PngChunkIter::new(data) {
        let chunk = chunk?;
        log::trace!("PNG chunk {} ({} bytes)", chunk.kind_str(), chunk.data.len());

        match &chunk.kind {
            b"IHDR" => {
                found.width = Some(BigEndian::read_u32(field(chunk.data, 0, 4)?));
                found.height = Some(BigEndian::read_u32(field(chunk.data, 4, 4)?));
            }
            b"pHYs" => {
                let ppu_x = BigEndian::read_u32(field(chunk.data, 0, 4)?);
                let unit = field(chunk.data, 8, 1)?[0];
                found.dpi = Some(if unit == UNIT_METER {
                    (ppu_x as f64 * INCHES_PER_METER).round() as u32
                } else {
                    UNITLESS_DPI
                });
            }
            _ => {}
        }

        if found.is_complete() {
            break;
        }
    }

    found.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::DEFAULT_DPI;

    fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = (data.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        out.extend_from_slice(&[0, 0, 0, 0]);
        out
    }

    fn ihdr(width: u32, height: u32) -> Vec<u8> {
        let mut data = width.to_be_bytes().to_vec();
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        chunk(b"IHDR", &data)
    }

    fn phys(ppu: u32, unit: u8) -> Vec<u8> {
        let mut data = ppu.to_be_bytes().to_vec();
        data.extend_from_slice(&ppu.to_be_bytes());
        data.push(unit);
        chunk(b"pHYs", &data)
    }

    fn png(chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut out = PNG_SIGNATURE.to_vec();
        for c in chunks {
            out.extend_from_slice(c);
        }
        out
    }

    #[test]
    fn test_png_meter_resolution() {
        let data = png(&[ihdr(640, 480), phys(2835, 1), chunk(b"IEND", &[])]);
        assert_eq!(read_png(&data).unwrap(), ImageInfo::new(640, 480, 72));
    }

    #[test]
    fn test_png_high_resolution() {
        // 11811 px/m is 300 dpi
        let data = png(&[ihdr(2480, 3508), phys(11811, 1)]);
        assert_eq!(read_png(&data).unwrap().dpi, 300);
    }

    #[test]
    fn test_png_unknown_unit_is_72() {
        let data = png(&[ihdr(10, 10), phys(5000, 0)]);
        assert_eq!(read_png(&data).unwrap().dpi, UNITLESS_DPI);
    }

    #[test]
    fn test_png_without_phys_defaults_to_96() {
        let data = png(&[ihdr(100, 50), chunk(b"IDAT", &[1, 2, 3]), chunk(b"IEND", &[])]);
        assert_eq!(read_png(&data).unwrap(), ImageInfo::new(100, 50, DEFAULT_DPI));
    }

    #[test]
    fn test_png_phys_before_ihdr() {
        let data = png(&[phys(3780, 1), ihdr(4, 8)]);
        assert_eq!(read_png(&data).unwrap(), ImageInfo::new(4, 8, 96));
    }

    #[test]
    fn test_png_stops_after_everything_is_known() {
        // Garbage after the second chunk is never reached.
        let mut data = png(&[ihdr(1, 2), phys(2835, 1)]);
        data.extend_from_slice(&[0xFF, 0xFF]);
        assert_eq!(read_png(&data).unwrap(), ImageInfo::new(1, 2, 72));
    }

    #[test]
    fn test_png_bad_signature() {
        let mut data = png(&[ihdr(1, 1)]);
        data[1] = b'X';
        assert_eq!(read_png(&data), Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn test_png_truncated_length_field() {
        let mut data = png(&[ihdr(1, 1)]);
        data.extend_from_slice(&[0, 0]);
        assert!(matches!(read_png(&data), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_png_truncated_ihdr() {
        let data = png(&[chunk(b"IHDR", &[0, 0, 1])]);
        assert!(matches!(read_png(&data), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_png_missing_ihdr() {
        let data = png(&[phys(2835, 1), chunk(b"IEND", &[])]);
        assert_eq!(read_png(&data), Err(DecodeError::MissingDimensions));
    }

    #[test]
    fn test_chunk_iter_clamps_last_chunk() {
        let mut data = png(&[ihdr(3, 3)]);
        // declared 100 bytes, only 2 present
        data.extend_from_slice(&100u32.to_be_bytes());
        data.extend_from_slice(b"tEXt");
        data.extend_from_slice(&[1, 2]);

        let chunks: Vec<_> = PngChunkIter::new(&data).collect::<Result<_, _>>().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].kind_str(), "tEXt");
        assert_eq!(chunks[1].data, &[1, 2]);
    }
}

//! JPEG marker stream reader.

use super::{clamped, field, tiff, DecodeError, Discovery, ImageInfo, UNITLESS_DPI};
use byteorder::{BigEndian, ByteOrder};

const MARKER_PREFIX: u8 = 0xFF;
const SOF0: u8 = 0xC0;
const SOF2: u8 = 0xC2;
const SOS: u8 = 0xDA;
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;

const JFIF_ID: &[u8; 4] = b"JFIF";
const EXIF_ID: &[u8; 4] = b"EXIF";
/// `Exif\0\0` precedes the embedded TIFF structure.
const EXIF_HEADER_LEN: usize = 6;

/// JFIF density units.
const JFIF_UNIT_INCH: u8 = 1;
const JFIF_UNIT_CM: u8 = 2;
const CM_PER_INCH: f64 = 2.54;

/// A marker segment with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegSegment<'b> {
    /// Marker byte following 0xFF
    pub marker: u8,
    /// Payload following the two length bytes
    pub data: &'b [u8],
}

/// Iterator over marker segments up to the start of scan.
///
/// Standalone markers (`0x01`, `0xD1..=0xD9`) are skipped. The 16-bit length
/// following a marker counts the length bytes themselves: the payload spans
/// `[offset + 2, offset + length)` where `offset` is the position of the
/// length field, and the next marker starts at `offset + length`.
#[derive(Debug, Clone)]
pub struct JpegMarkerIter<'b> {
    data: &'b [u8],
    offset: usize,
    done: bool,
}

impl<'b> JpegMarkerIter<'b> {
    /// Iterate markers from the first byte of the stream.
    pub fn new(data: &'b [u8]) -> Self {
        Self {
            data,
            offset: 0,
            done: false,
        }
    }

    fn fail(&mut self, err: DecodeError) -> Option<Result<JpegSegment<'b>, DecodeError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'b> Iterator for JpegMarkerIter<'b> {
    type Item = Result<JpegSegment<'b>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done && self.offset < self.data.len() {
            let prefix = self.data[self.offset];
            if prefix != MARKER_PREFIX {
                let offset = self.offset;
                return self.fail(DecodeError::InvalidMarker {
                    offset,
                    found: prefix,
                });
            }
            self.offset += 1;

            let marker = match field(self.data, self.offset, 1) {
                Ok(bytes) => bytes[0],
                Err(e) => return self.fail(e),
            };

            if marker == 0x01 || (0xD1..=0xD9).contains(&marker) {
                self.offset += 1;
                continue;
            }
            if marker == SOS {
                // entropy-coded data follows
                self.done = true;
                return None;
            }

            self.offset += 1;
            let length = match field(self.data, self.offset, 2) {
                Ok(bytes) => BigEndian::read_u16(bytes),
                Err(e) => return self.fail(e),
            };
            if length < 2 {
                let offset = self.offset;
                return self.fail(DecodeError::InvalidSegmentLength { offset, length });
            }

            let data_start = self.offset + 2;
            let data_end = self.offset + length as usize;
            let segment = JpegSegment {
                marker,
                data: clamped(self.data, data_start, data_end),
            };
            self.offset = data_end;
            return Some(Ok(segment));
        }
        None
    }
}

/// Decode width, height and resolution from JPEG bytes.
///
/// Dimensions come from the baseline or progressive start-of-frame segment.
/// Resolution comes from a JFIF `APP0` density block or an EXIF `APP1`
/// block, whichever appears last before everything is known. Without
/// either the result is 96 dpi.
pub fn read_jpeg(data: &[u8]) -> Result<ImageInfo, DecodeError> {
    let mut found = Discovery::default();

    for segment in JpegMarkerIter::new(data) {
        let segment = segment?;
        log::trace!(
            "JPEG marker 0x{:02X} ({} bytes)",
            segment.marker,
            segment.data.len()
        );

        match segment.marker {
            APP0 if has_identifier(segment.data, JFIF_ID) => {
                found.dpi = Some(jfif_dpi(segment.data)?);
            }
            APP1 if has_identifier(segment.data, EXIF_ID) => {
                let tiff_data = clamped(segment.data, EXIF_HEADER_LEN, segment.data.len());
                found.dpi = tiff::read_resolution(tiff_data)?;
            }
            SOF0 | SOF2 => {
                found.height = Some(BigEndian::read_u16(field(segment.data, 1, 2)?) as u32);
                found.width = Some(BigEndian::read_u16(field(segment.data, 3, 2)?) as u32);
            }
            _ => {}
        }

        if found.is_complete() {
            break;
        }
    }

    found.finish()
}

/// Compare the first four payload bytes, ignoring ASCII case.
fn has_identifier(data: &[u8], id: &[u8; 4]) -> bool {
    data.get(..4).is_some_and(|head| head.eq_ignore_ascii_case(id))
}

/// Resolution from a JFIF header: unit at offset 7, then X and Y density.
fn jfif_dpi(data: &[u8]) -> Result<u32, DecodeError> {
    let unit = field(data, 7, 1)?[0];
    let ppu_x = BigEndian::read_u16(field(data, 8, 2)?);
    let _ppu_y = BigEndian::read_u16(field(data, 10, 2)?);

    Ok(match unit {
        JFIF_UNIT_INCH => ppu_x as u32,
        JFIF_UNIT_CM => (ppu_x as f64 * CM_PER_INCH).round() as u32,
        _ => UNITLESS_DPI,
    })
}

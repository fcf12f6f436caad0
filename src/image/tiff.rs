//! Resolution lookup in the TIFF structure embedded in an EXIF block.

use super::{field, DecodeError, UNITLESS_DPI};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

const TAG_X_RESOLUTION: u16 = 0x011A;
const TAG_Y_RESOLUTION: u16 = 0x011B;
const TAG_RESOLUTION_UNIT: u16 = 0x0128;
/// Pointer to the Exif sub-IFD; ends the IFD0 walk.
const TAG_EXIF_IFD: u16 = 0x8769;

const IFD_ENTRY_LEN: usize = 12;
const ENTRY_VALUE_OFFSET: usize = 8;

const UNIT_INCH: u32 = 2;
const UNIT_CM: u32 = 3;
const CM_PER_INCH: f64 = 2.54;

/// Read the resolution declared in IFD0 of a TIFF structure.
///
/// `data` starts at the byte-order mark (`II` little-endian, anything else
/// big-endian). Entries are walked from the first IFD until the Exif IFD
/// pointer tag. Resolution values are offsets to a rational whose numerator
/// is taken as pixels per unit.
///
/// ResolutionUnit is read as the full 4-byte value field of its entry. A
/// SHORT unit in a big-endian block lands in the high half and reads as no
/// known unit, giving 72 dpi.
///
/// Returns `None` when the unit names inches or centimeters but no
/// X resolution was seen.
pub(crate) fn read_resolution(data: &[u8]) -> Result<Option<u32>, DecodeError> {
    if field(data, 0, 2)? == b"II" {
        walk_ifd0::<LittleEndian>(data)
    } else {
        walk_ifd0::<BigEndian>(data)
    }
}

fn walk_ifd0<E: ByteOrder>(data: &[u8]) -> Result<Option<u32>, DecodeError> {
    let ifd0 = E::read_u32(field(data, 4, 4)?) as usize;
    // skip the 2-byte entry count
    let mut offset = ifd0.saturating_add(2);

    let mut unit = None;
    let mut ppu_x = None;
    let mut _ppu_y = None;

    loop {
        let tag = E::read_u16(field(data, offset, 2)?);
        match tag {
            TAG_EXIF_IFD => break,
            TAG_X_RESOLUTION => ppu_x = Some(rational_numerator::<E>(data, offset)?),
            TAG_Y_RESOLUTION => _ppu_y = Some(rational_numerator::<E>(data, offset)?),
            TAG_RESOLUTION_UNIT => {
                // full 4-byte value field
                unit = Some(E::read_u32(field(data, offset + ENTRY_VALUE_OFFSET, 4)?));
            }
            _ => {}
        }
        offset += IFD_ENTRY_LEN;
    }

    log::trace!("EXIF resolution unit {:?}, x {:?}", unit, ppu_x);

    Ok(match unit {
        Some(UNIT_INCH) => ppu_x,
        Some(UNIT_CM) => ppu_x.map(|x| (x as f64 * CM_PER_INCH).round() as u32),
        _ => Some(UNITLESS_DPI),
    })
}

/// Follow the entry's value offset and read the rational's numerator.
fn rational_numerator<E: ByteOrder>(data: &[u8], entry: usize) -> Result<u32, DecodeError> {
    let addr = E::read_u32(field(data, entry + ENTRY_VALUE_OFFSET, 4)?) as usize;
    Ok(E::read_u32(field(data, addr, 4)?))
}

//! Synthetic image fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}

/// PNG with an IHDR and, if given, a pHYs chunk in pixels per meter.
pub fn png(width: u32, height: u32, pixels_per_meter: Option<u32>) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();

    let mut ihdr = width.to_be_bytes().to_vec();
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    out.extend(png_chunk(b"IHDR", &ihdr));

    if let Some(ppm) = pixels_per_meter {
        let mut phys = ppm.to_be_bytes().to_vec();
        phys.extend_from_slice(&ppm.to_be_bytes());
        phys.push(1);
        out.extend(png_chunk(b"pHYs", &phys));
    }

    out.extend(png_chunk(b"IDAT", &[0x78, 0x9C, 0x03, 0x00]));
    out.extend(png_chunk(b"IEND", &[]));
    out
}

fn jpeg_segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Baseline JPEG with a JFIF header in dots per inch, if given.
pub fn jpeg(width: u16, height: u16, dpi: Option<u16>) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];

    if let Some(dpi) = dpi {
        let mut app0 = b"JFIF\0".to_vec();
        app0.extend_from_slice(&[1, 1, 1]);
        app0.extend_from_slice(&dpi.to_be_bytes());
        app0.extend_from_slice(&dpi.to_be_bytes());
        app0.extend_from_slice(&[0, 0]);
        out.extend(jpeg_segment(0xE0, &app0));
    }

    let mut sof = vec![8];
    sof.extend_from_slice(&height.to_be_bytes());
    sof.extend_from_slice(&width.to_be_bytes());
    sof.extend_from_slice(&[1, 1, 0x11, 0]);
    out.extend(jpeg_segment(0xC0, &sof));

    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 1, 1, 0, 0, 0x3F, 0]);
    out.extend_from_slice(&[0xAB, 0xCD, 0xFF, 0xD9]);
    out
}

/// JPEG whose resolution comes from an EXIF block in either byte order.
///
/// The unit entry is a SHORT of 2 (inches) stored in the first half of its
/// value field, as cameras write it.
pub fn jpeg_exif(width: u16, height: u16, dpi: u32, little_endian: bool) -> Vec<u8> {
    let u16b = |v: u16| if little_endian { v.to_le_bytes() } else { v.to_be_bytes() };
    let u32b = |v: u32| if little_endian { v.to_le_bytes() } else { v.to_be_bytes() };

    // header (8) + count (2) + 4 entries (48) + next IFD (4)
    let rational = 8 + 2 + 4 * 12 + 4;
    let mut unit = [0u8; 4];
    unit[..2].copy_from_slice(&u16b(2));

    let mut tiff = if little_endian { b"II".to_vec() } else { b"MM".to_vec() };
    tiff.extend_from_slice(&u16b(42));
    tiff.extend_from_slice(&u32b(8));
    tiff.extend_from_slice(&u16b(4));
    for (tag, kind, value) in [
        (0x011Au16, 5u16, u32b(rational)),
        (0x011B, 5, u32b(rational + 8)),
        (0x0128, 3, unit),
        (0x8769, 4, [0, 0, 0, 0]),
    ] {
        tiff.extend_from_slice(&u16b(tag));
        tiff.extend_from_slice(&u16b(kind));
        tiff.extend_from_slice(&u32b(1));
        tiff.extend_from_slice(&value);
    }
    tiff.extend_from_slice(&u32b(0));
    for _ in 0..2 {
        tiff.extend_from_slice(&u32b(dpi));
        tiff.extend_from_slice(&u32b(1));
    }

    let mut app1 = b"Exif\0\0".to_vec();
    app1.extend(tiff);

    let mut out = vec![0xFF, 0xD8];
    out.extend(jpeg_segment(0xE1, &app1));
    let mut sof = vec![8];
    sof.extend_from_slice(&height.to_be_bytes());
    sof.extend_from_slice(&width.to_be_bytes());
    sof.extend_from_slice(&[1, 1, 0x11, 0]);
    out.extend(jpeg_segment(0xC0, &sof));
    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02]);
    out
}

/// Write bytes to `dir/name` and return the path.
pub fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, data).unwrap();
    path
}

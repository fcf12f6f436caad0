//! Conversion of pixel dimensions to physical print size.

use crate::transform::ImageSizeLimit;

/// Points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Convert pixel dimensions at `dpi` to points, rounding each axis.
///
/// Returns `None` if any input is NaN or the resolution is zero.
///
/// ```
/// use mdprint::image::to_points;
///
/// assert_eq!(to_points(300.0, 200.0, 150.0), Some((144.0, 96.0)));
/// assert_eq!(to_points(f32::NAN, 200.0, 96.0), None);
/// ```
pub fn to_points(width_px: f32, height_px: f32, dpi: f32) -> Option<(f32, f32)> {
    if width_px.is_nan() || height_px.is_nan() || dpi.is_nan() || dpi == 0.0 {
        return None;
    }
    Some((
        (width_px * POINTS_PER_INCH / dpi).round(),
        (height_px * POINTS_PER_INCH / dpi).round(),
    ))
}

/// Width between the left and right margins.
pub fn available_width(page_width: f32, left_margin: f32, right_margin: f32) -> f32 {
    page_width - left_margin - right_margin
}

/// Cap an image width to the printable width or to a configured limit.
pub fn clamp_width(
    width_pt: f32,
    page_width: f32,
    left_margin: f32,
    right_margin: f32,
    limit: Option<ImageSizeLimit>,
) -> f32 {
    let available = available_width(page_width, left_margin, right_margin);
    let cap = limit.map_or(available, |limit| limit.resolve(available));
    width_pt.min(cap)
}

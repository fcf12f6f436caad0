//! Conversion options and configuration.

use crate::error::{Error, Result};
use crate::model::{KeywordTable, StyleSheet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for converting an element tree to a print tree.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Directory image paths are resolved against
    pub base_dir: Option<PathBuf>,

    /// Page size in points
    pub page_size: PageSize,

    /// Page margins in points
    pub margins: Margins,

    /// Cap on image width
    pub image_limit: Option<ImageSizeLimit>,

    /// Named styles the tree refers to
    pub styles: StyleSheet,

    /// Admonition trigger words
    pub keywords: KeywordTable,

    /// Convert batches of documents in parallel
    pub parallel: bool,
}

impl TransformOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory for image paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the image width cap.
    pub fn with_image_limit(mut self, limit: ImageSizeLimit) -> Self {
        self.image_limit = Some(limit);
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Set the keyword table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Enable or disable parallel batch conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch conversion.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Width between the left and right margins.
    pub fn available_width(&self) -> f32 {
        crate::image::available_width(self.page_size.width, self.margins.left, self.margins.right)
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            base_dir: None,
            page_size: PageSize::default(),
            margins: Margins::default(),
            image_limit: None,
            styles: StyleSheet::default(),
            keywords: KeywordTable::default(),
            parallel: true,
        }
    }
}

/// Page size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 612 x 792 pt.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// A4, 595.28 x 841.89 pt.
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    /// Create a page size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Parse `"width,height"`, or the names `letter` and `a4`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "letter" => return Ok(Self::LETTER),
            "a4" => return Ok(Self::A4),
            _ => {}
        }

        let values = parse_numbers(s)?;
        match values[..] {
            [width, height] if width > 0.0 && height > 0.0 => Ok(Self::new(width, height)),
            _ => Err(Error::InvalidConfig(format!(
                "page size must be two positive numbers: {}",
                s
            ))),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Build margins from 1 value (all sides), 2 values
    /// (`[horizontal, vertical]`) or 4 values (`[left, top, right, bottom]`).
    pub fn from_values(values: &[f32]) -> Result<Self> {
        match *values {
            [all] => Ok(Self::uniform(all)),
            [horizontal, vertical] => Ok(Self {
                left: horizontal,
                top: vertical,
                right: horizontal,
                bottom: vertical,
            }),
            [left, top, right, bottom] => Ok(Self {
                left,
                top,
                right,
                bottom,
            }),
            _ => Err(Error::InvalidConfig(format!(
                "margins take 1, 2 or 4 values, got {}",
                values.len()
            ))),
        }
    }

    /// Parse comma-separated margins, e.g. `"36"` or `"36,48"`.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_values(&parse_numbers(s)?)
    }

    /// `[left, top, right, bottom]`
    pub fn to_array(self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

/// Cap on the printed width of images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSizeLimit {
    /// Absolute width in points
    Points(f32),
    /// Fraction of the width between margins
    Fraction(f32),
}

impl ImageSizeLimit {
    /// Interpret a bare number: below 1 is a fraction, otherwise points.
    ///
    /// Zero, negative and non-finite values mean no limit.
    pub fn from_value(value: f32) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            None
        } else if value < 1.0 {
            Some(ImageSizeLimit::Fraction(value))
        } else {
            Some(ImageSizeLimit::Points(value))
        }
    }

    /// Parse `"300"` (points), `"0.5"` or `"50%"` (fraction).
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidConfig(format!("invalid image size: {}", s));

        if let Some(pct) = s.strip_suffix('%') {
            let pct: f32 = pct.trim().parse().map_err(|_| invalid())?;
            if !(pct > 0.0 && pct < 100.0) {
                return Err(Error::InvalidConfig(format!(
                    "image size percentage must be between 0 and 100: {}",
                    s
                )));
            }
            return Ok(ImageSizeLimit::Fraction(pct / 100.0));
        }

        let value: f32 = s.parse().map_err(|_| invalid())?;
        Self::from_value(value).ok_or_else(invalid)
    }

    /// Effective cap in points for a given available width.
    pub fn resolve(self, available: f32) -> f32 {
        match self {
            ImageSizeLimit::Points(points) => points,
            ImageSizeLimit::Fraction(fraction) => available * fraction,
        }
    }
}

fn parse_numbers(s: &str) -> Result<Vec<f32>> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::InvalidConfig(format!("invalid number: {:?}", part)))
        })
        .collect()
}

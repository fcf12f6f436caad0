//! Named print styles.
//!
//! The walker only attaches style names to output nodes. The sheet travels
//! with the document definition so the renderer can resolve them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style names emitted by the walker.
pub mod names {
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING: &str = "heading";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const HORIZONTAL_RULE: &str = "horizontalRule";
    pub const TABLE: &str = "table";
    pub const TABLE_HEADER: &str = "tableHeader";
    pub const ALIGN_CENTER: &str = "alignCenter";
    pub const ALIGN_RIGHT: &str = "alignRight";
    pub const IMAGE: &str = "image";
    pub const IMAGE_ALT: &str = "imageAlt";
    pub const PREFORMATTED: &str = "preformatted";
    pub const CODE: &str = "code";
    pub const PRE_CODE: &str = "preCode";
    pub const INLINE_CODE: &str = "inlineCode";
    pub const LINK: &str = "link";
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Style name carrying this alignment, if any.
    pub fn style_name(self) -> Option<&'static str> {
        match self {
            Alignment::Left => None,
            Alignment::Center => Some(names::ALIGN_CENTER),
            Alignment::Right => Some(names::ALIGN_RIGHT),
        }
    }
}

/// Visual attributes of a named style. Unset fields inherit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_leading_spaces: Option<bool>,
}

impl Style {
    /// Set the text color and return self.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set fill and border colors and return self.
    pub fn fill(mut self, fill: impl Into<String>, border: impl Into<String>) -> Self {
        self.fill_color = Some(fill.into());
        self.border_color = Some(border.into());
        self
    }

    /// Set the font size and return self.
    pub fn size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the bottom margin and return self.
    pub fn margin_bottom(mut self, margin: f32) -> Self {
        self.margin_bottom = Some(margin);
        self
    }

    /// Make the text bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    /// Make the text italic and return self.
    pub fn italics(mut self) -> Self {
        self.italics = Some(true);
        self
    }

    /// Set the line height and return self.
    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }
}

/// Base font size of the default sheet.
const REM: f32 = 12.0;

/// Default text style applied to the whole document.
pub fn default_style() -> Style {
    Style {
        font: Some("Roboto".to_string()),
        font_size: Some(REM),
        line_height: Some(1.4),
        alignment: Some(Alignment::Left),
        ..Style::default()
    }
}

/// Mapping from style name to visual attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet(BTreeMap<String, Style>);

impl StyleSheet {
    /// Create an empty sheet.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Look up a style.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.0.get(name)
    }

    /// Insert or replace a style.
    pub fn insert(&mut self, name: impl Into<String>, style: Style) {
        self.0.insert(name.into(), style);
    }

    /// Insert a style and return self.
    pub fn with(mut self, name: impl Into<String>, style: Style) -> Self {
        self.insert(name, style);
        self
    }

    /// Border color of a style.
    pub fn border_color(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|s| s.border_color.as_deref())
    }

    /// Overlay another sheet; its entries replace same-named ones.
    pub fn merge(&mut self, other: StyleSheet) {
        self.0.extend(other.0);
    }

    /// Style names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the sheet has no styles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let code = |color: &str| Style::default().color(color);

        StyleSheet::empty()
            .with(
                names::LINK,
                Style {
                    decoration: Some("underline".to_string()),
                    ..Style::default()
                },
            )
            .with(
                names::HEADING,
                Style::default()
                    .bold()
                    .line_height(1.25)
                    .margin_bottom(0.5 * REM),
            )
            .with("h1", Style::default().size(2.0 * REM))
            .with("h2", Style::default().size(1.5 * REM))
            .with("h3", Style::default().size(1.25 * REM))
            .with("h4", Style::default().size(REM))
            .with("h5", Style::default().size(0.875 * REM))
            .with("h6", Style::default().size(0.85 * REM).color("#6a737b"))
            .with(names::PARAGRAPH, Style::default().margin_bottom(0.6 * REM))
            .with(
                names::BLOCKQUOTE,
                Style {
                    padding_left: Some(6.0),
                    padding_right: Some(4.0),
                    padding_top: Some(4.0),
                    padding_bottom: Some(0.0),
                    ..Style::default()
                        .fill("#f9fafb", "#6b7280")
                        .line_height(1.4)
                        .margin_bottom(0.7 * REM)
                },
            )
            .with("info", Style::default().fill("#eff6ff", "#3b82f6"))
            .with("hint", Style::default().fill("#ecfdf5", "#10b981"))
            .with("warning", Style::default().fill("#fffbeb", "#f59e0b"))
            .with("danger", Style::default().fill("#fef2f2", "#ef4444"))
            .with(
                names::HORIZONTAL_RULE,
                Style {
                    border_color: Some("#d1d1d1".to_string()),
                    ..Style::default()
                },
            )
            .with(
                names::TABLE,
                Style::default().margin_bottom(0.7 * REM).line_height(1.0),
            )
            .with(names::IMAGE, Style::default().margin_bottom(0.7 * REM))
            .with(
                names::IMAGE_ALT,
                Style::default()
                    .color("#a31515")
                    .size(0.75 * REM)
                    .margin_bottom(0.7 * REM),
            )
            .with(names::TABLE_HEADER, Style::default().bold())
            .with(
                names::ALIGN_CENTER,
                Style {
                    alignment: Some(Alignment::Center),
                    ..Style::default()
                },
            )
            .with(
                names::ALIGN_RIGHT,
                Style {
                    alignment: Some(Alignment::Right),
                    ..Style::default()
                },
            )
            .with(
                names::PREFORMATTED,
                Style {
                    preserve_leading_spaces: Some(true),
                    padding: Some(4.0),
                    ..Style::default().margin_bottom(0.7 * REM).line_height(1.357)
                },
            )
            .with(
                names::CODE,
                Style {
                    font: Some("UbuntuMono".to_string()),
                    ..Style::default()
                },
            )
            .with(names::PRE_CODE, Style::default().size(0.85 * REM))
            .with(names::INLINE_CODE, code("#a31515"))
            .with("codeKeyword", code("#d73a49"))
            .with("codeTitle", code("#6f42c1"))
            .with("codeVariable", code("#005cc5"))
            .with("codeString", code("#032f62"))
            .with("codeSymbol", code("#e36209"))
            .with("codeComment", code("#6a737d"))
            .with("codeName", code("#22863a"))
            .with("codeSubst", code("#24292e"))
            .with("codeSection", code("#005cc5").bold())
            .with("codeBullet", code("#735c0f"))
            .with("codeEmphasis", code("#24292e").italics())
            .with("codeStrong", code("#24292e").bold())
            .with(
                "codeAddition",
                Style {
                    background: Some("#f0fff4".to_string()),
                    ..code("#22863a")
                },
            )
            .with(
                "codeDeletion",
                Style {
                    background: Some("#ffeef0".to_string()),
                    ..code("#b31d28")
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_has_emitted_names() {
        let sheet = StyleSheet::default();
        for name in [
            "paragraph",
            "heading",
            "h1",
            "h6",
            "blockquote",
            "info",
            "hint",
            "warning",
            "danger",
            "horizontalRule",
            "table",
            "tableHeader",
            "alignCenter",
            "alignRight",
            "image",
            "imageAlt",
            "preformatted",
            "code",
            "preCode",
            "inlineCode",
            "link",
            "codeKeyword",
            "codeDeletion",
        ] {
            assert!(sheet.get(name).is_some(), "missing style {}", name);
        }
    }

    #[test]
    fn test_admonition_colors() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.border_color("warning"), Some("#f59e0b"));
        assert_eq!(sheet.border_color("blockquote"), Some("#6b7280"));
        assert_eq!(sheet.border_color("paragraph"), None);
        assert_eq!(sheet.get("h1").unwrap().font_size, Some(24.0));
    }

    #[test]
    fn test_serialises_camel_case() {
        let sheet = StyleSheet::default();
        let json = serde_json::to_string(&sheet).unwrap();
        assert!(json.contains("\"fillColor\":\"#f9fafb\""));
        assert!(json.contains("\"preserveLeadingSpaces\":true"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_merge_overrides() {
        let mut sheet = StyleSheet::default();
        let custom: StyleSheet =
            serde_json::from_str(r##"{"warning": {"fillColor": "#000", "borderColor": "#111"}}"##)
                .unwrap();
        let before = sheet.len();
        sheet.merge(custom);
        assert_eq!(sheet.len(), before);
        assert_eq!(sheet.border_color("warning"), Some("#111"));
    }

    #[test]
    fn test_alignment_style_name() {
        assert_eq!(Alignment::Left.style_name(), None);
        assert_eq!(Alignment::Center.style_name(), Some("alignCenter"));
        assert_eq!(Alignment::Right.style_name(), Some("alignRight"));
    }
}

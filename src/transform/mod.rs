//! Element tree to print tree conversion.
//!
//! The walker dispatches on node kind and builds the output bottom-up per
//! subtree. Context queries ("am I inside a `pre`?") go through an
//! [`Ancestry`] chain threaded down the recursion.
//!
//! # Example
//!
//! ```
//! use mdprint::model::{Content, Node, NodeKind, PrintNode};
//! use mdprint::transform::{TransformOptions, Transformer};
//!
//! let nodes = vec![Node::element(
//!     NodeKind::Heading(2),
//!     vec![Node::text("Install")],
//! )];
//!
//! let options = TransformOptions::default();
//! let content = Transformer::new(&options).transform(&nodes);
//! assert!(matches!(
//!     content.nodes(),
//!     [PrintNode::Heading { level: 2, .. }]
//! ));
//! ```

mod admonition;
mod ancestry;
mod highlight;
mod options;
mod table;

pub use admonition::{bold_trigger, resolve_blockquote};
pub use ancestry::Ancestry;
pub use highlight::{classify, highlight_class, HIGHLIGHT_PREFIX};
pub use options::{ImageSizeLimit, Margins, PageSize, TransformOptions};
pub use table::cell_alignment;

use crate::detect::is_remote_url;
use crate::error::{Error, Result};
use crate::image::{clamp_width, read_image_file, ImageInfo};
use crate::model::{style_names, Border, Content, Node, NodeKind, Padding, PrintNode};
use crate::render::TransformStats;
use std::path::PathBuf;

/// Left border width of blockquotes, in points.
const BLOCKQUOTE_BORDER_WIDTH: f32 = 3.0;

/// Space below a horizontal rule, in points.
const RULE_MARGIN_BOTTOM: f32 = 8.0;

/// An image resolved on disk and sized for print.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// Absolute or base-relative path of the file
    pub path: PathBuf,
    /// Decoded metadata
    pub info: ImageInfo,
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

/// Walks one element tree and produces its print tree.
#[derive(Debug)]
pub struct Transformer<'o> {
    options: &'o TransformOptions,
    stats: TransformStats,
}

impl<'o> Transformer<'o> {
    /// Create a walker over the given options.
    pub fn new(options: &'o TransformOptions) -> Self {
        Self {
            options,
            stats: TransformStats::default(),
        }
    }

    /// Convert the top-level nodes of a document.
    pub fn transform(&mut self, nodes: &[Node]) -> Content {
        self.parse_nodes(nodes, None)
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &TransformStats {
        &self.stats
    }

    /// Consume the walker and return its statistics.
    pub fn into_stats(self) -> TransformStats {
        self.stats
    }

    /// Convert a sibling list.
    ///
    /// A lone text child stays a bare string. Otherwise every child that
    /// produces output is collected in order; empty text is dropped.
    fn parse_nodes(&mut self, nodes: &[Node], parent: Option<&Ancestry<'_>>) -> Content {
        if let [only] = nodes {
            if only.is_text() {
                return Content::Text(text_value(parent, only));
            }
        }

        let items = nodes
            .iter()
            .filter_map(|node| match parent {
                Some(p) => self.transform_node(&p.child(node)),
                None => self.transform_node(&Ancestry::root(node)),
            })
            .collect();
        Content::Nodes(items)
    }

    /// Convert one node, or drop it.
    pub fn transform_node(&mut self, frame: &Ancestry<'_>) -> Option<PrintNode> {
        let node = frame.node();
        match &node.kind {
            NodeKind::Text => {
                let text = text_value(frame.parent(), node);
                (!text.is_empty()).then(|| PrintNode::plain(text))
            }
            NodeKind::Heading(level) => {
                self.stats.add_heading();
                Some(PrintNode::Heading {
                    level: *level,
                    text: self.children(frame),
                    styles: vec![style_names::HEADING.to_string(), node.kind.tag().to_string()],
                })
            }
            NodeKind::Paragraph => self.paragraph(frame),
            NodeKind::Bold => Some(self.bold(frame)),
            NodeKind::Italic => Some(PrintNode::StyledText {
                text: self.children(frame),
                styles: Vec::new(),
                bold: false,
                italics: true,
                color: None,
                link: None,
            }),
            NodeKind::Preformatted => Some(self.preformatted(frame)),
            NodeKind::Span => {
                let styles = node
                    .attr("class")
                    .and_then(highlight_class)
                    .and_then(classify)
                    .map(|s| vec![s.to_string()])
                    .unwrap_or_default();
                Some(PrintNode::styled(self.children(frame), styles))
            }
            NodeKind::Code => {
                let variant = if frame.parent_is(&NodeKind::Preformatted) {
                    style_names::PRE_CODE
                } else {
                    style_names::INLINE_CODE
                };
                Some(PrintNode::styled(
                    self.children(frame),
                    vec![style_names::CODE.to_string(), variant.to_string()],
                ))
            }
            NodeKind::Blockquote => Some(self.blockquote(frame)),
            NodeKind::Link => Some(PrintNode::StyledText {
                text: self.children(frame),
                styles: vec![style_names::LINK.to_string()],
                bold: false,
                italics: false,
                color: None,
                link: Some(node.attr("href").unwrap_or_default().to_string()),
            }),
            NodeKind::List { ordered } => self.list(frame, *ordered),
            NodeKind::Rule => Some(PrintNode::Rule {
                color: self
                    .options
                    .styles
                    .border_color(style_names::HORIZONTAL_RULE)
                    .map(String::from),
                margin_bottom: RULE_MARGIN_BOTTOM,
            }),
            NodeKind::Table => self.table(frame),
            NodeKind::Image => self.image(node),
            NodeKind::ListItem
            | NodeKind::TableHead
            | NodeKind::TableBody
            | NodeKind::TableRow
            | NodeKind::TableHeaderCell
            | NodeKind::TableCell
            | NodeKind::Other(_) => None,
        }
    }

    fn children(&mut self, frame: &Ancestry<'_>) -> Content {
        self.parse_nodes(&frame.node().children, Some(frame))
    }

    /// A paragraph, split around inline images when it contains any.
    fn paragraph(&mut self, frame: &Ancestry<'_>) -> Option<PrintNode> {
        let node = frame.node();
        if !node.has_child(&NodeKind::Image) {
            self.stats.add_paragraph();
            let styles = if frame.parent_is(&NodeKind::Blockquote) {
                Vec::new()
            } else {
                vec![style_names::PARAGRAPH.to_string()]
            };
            return Some(PrintNode::Paragraph {
                text: self.children(frame),
                styles,
            });
        }

        let mut segments = Vec::new();
        let mut start = 0;
        for (i, child) in node.children.iter().enumerate() {
            if child.kind != NodeKind::Image {
                continue;
            }
            if i > start {
                segments.push(self.segment(frame, &node.children[start..i]));
            }
            if let Some(image) = self.transform_node(&frame.child(child)) {
                segments.push(image);
            }
            start = i + 1;
        }
        if start < node.children.len() {
            segments.push(self.segment(frame, &node.children[start..]));
        }

        match segments.len() {
            0 => None,
            1 => segments.pop(),
            _ => Some(PrintNode::Stack { items: segments }),
        }
    }

    fn segment(&mut self, frame: &Ancestry<'_>, run: &[Node]) -> PrintNode {
        self.stats.add_paragraph();
        PrintNode::Paragraph {
            text: self.parse_nodes(run, Some(frame)),
            styles: vec![style_names::PARAGRAPH.to_string()],
        }
    }

    /// Bold run, colored like its admonition when it leads a blockquote.
    fn bold(&mut self, frame: &Ancestry<'_>) -> PrintNode {
        let options = self.options;
        let color = bold_trigger(frame, &options.keywords)
            .and_then(|variant| options.styles.border_color(variant.style_name()))
            .map(String::from);

        PrintNode::StyledText {
            text: self.children(frame),
            styles: Vec::new(),
            bold: true,
            italics: false,
            color,
            link: None,
        }
    }

    fn preformatted(&mut self, frame: &Ancestry<'_>) -> PrintNode {
        self.stats.add_code_block();
        let padding = self
            .options
            .styles
            .get(style_names::PREFORMATTED)
            .and_then(|s| s.padding)
            .unwrap_or_default();

        PrintNode::CodeBlock {
            content: self.children(frame),
            styles: vec![style_names::PREFORMATTED.to_string()],
            padding,
        }
    }

    fn blockquote(&mut self, frame: &Ancestry<'_>) -> PrintNode {
        let options = self.options;
        let variant = resolve_blockquote(frame.node(), &options.keywords);
        self.stats.add_blockquote(variant.is_some());
        if let Some(variant) = variant {
            log::debug!("Blockquote rendered as {} admonition", variant);
        }

        let mut styles = vec![style_names::BLOCKQUOTE.to_string()];
        if let Some(variant) = variant {
            styles.push(variant.style_name().to_string());
        }

        let border_style = variant.map_or(style_names::BLOCKQUOTE, |v| v.style_name());
        let quote_style = options.styles.get(style_names::BLOCKQUOTE);
        let side = |pick: fn(&crate::model::Style) -> Option<f32>| {
            quote_style.and_then(pick).unwrap_or_default()
        };

        PrintNode::Blockquote {
            variant,
            content: self.children(frame),
            styles,
            border: Border {
                width: BLOCKQUOTE_BORDER_WIDTH,
                color: options.styles.border_color(border_style).map(String::from),
            },
            padding: Padding {
                left: side(|s| s.padding_left),
                right: side(|s| s.padding_right),
                top: side(|s| s.padding_top),
                bottom: side(|s| s.padding_bottom),
            },
        }
    }

    /// A list of `li` children; other children are ignored.
    fn list(&mut self, frame: &Ancestry<'_>, ordered: bool) -> Option<PrintNode> {
        let node = frame.node();
        let items: Vec<PrintNode> = node
            .children
            .iter()
            .filter(|c| c.kind == NodeKind::ListItem)
            .map(|li| {
                let item = frame.child(li);
                let content = self.children(&item);
                if li.has_child(&NodeKind::Paragraph) {
                    content.into_node()
                } else {
                    PrintNode::styled(content, Vec::new())
                }
            })
            .collect();

        if items.is_empty() {
            log::debug!("Omitting list without items");
            return None;
        }
        self.stats.add_list();
        Some(PrintNode::List { ordered, items })
    }

    /// An image sized for print, or its alt-text fallback.
    fn image(&mut self, node: &Node) -> Option<PrintNode> {
        let src = node.attr("src")?;
        let alt = node.attr("alt").filter(|alt| !alt.is_empty());

        let loaded = match self.load_image(src) {
            Ok(loaded) => loaded,
            Err(e) => {
                match &e {
                    Error::Decode(_) | Error::Io(_) => log::warn!("{} [{}]", e, src),
                    _ => log::error!("{} [{}]", e, src),
                }
                self.stats.add_rejected_image();
                return alt.map(|alt| PrintNode::Caption {
                    text: alt.to_string(),
                    styles: vec![style_names::TABLE.to_string()],
                    bordered: true,
                });
            }
        };
        self.stats.add_image();

        let options = self.options;
        let Some(alt) = alt else {
            return Some(PrintNode::Image {
                path: loaded.path,
                width: loaded.width,
                height: loaded.height,
                fit: None,
                alt_text: None,
                styles: vec![style_names::IMAGE.to_string()],
            });
        };

        let fit = clamp_width(
            loaded.width,
            options.page_size.width,
            options.margins.left,
            options.margins.right,
            options.image_limit,
        );
        Some(PrintNode::Stack {
            items: vec![
                PrintNode::Image {
                    path: loaded.path,
                    width: loaded.width,
                    height: loaded.height,
                    fit: Some(fit),
                    alt_text: Some(alt.to_string()),
                    styles: Vec::new(),
                },
                PrintNode::Caption {
                    text: alt.to_string(),
                    styles: vec![style_names::IMAGE_ALT.to_string()],
                    bordered: false,
                },
            ],
        })
    }

    /// Resolve an image reference against the base directory and size it.
    pub fn load_image(&self, src: &str) -> Result<LoadedImage> {
        if is_remote_url(src) {
            return Err(Error::RemoteImage(src.to_string()));
        }
        let base_dir = self.options.base_dir.as_ref().ok_or(Error::MissingBaseDir)?;
        let path = base_dir.join(src.strip_prefix('/').unwrap_or(src));

        let info = read_image_file(&path)?;
        let (width, height) = info.print_size().ok_or(Error::InvalidDimensions {
            width: info.width as f32,
            height: info.height as f32,
            dpi: info.dpi as f32,
        })?;

        log::debug!(
            "Image {} is {}x{} px at {} dpi, {}x{} pt",
            path.display(),
            info.width,
            info.height,
            info.dpi,
            width,
            height
        );
        Ok(LoadedImage {
            path,
            info,
            width,
            height,
        })
    }
}

/// Literal text of a text node; a bare newline is dropped outside code.
fn text_value(parent: Option<&Ancestry<'_>>, node: &Node) -> String {
    let value = node.text_value();
    if value == "\n" {
        let in_code = parent.is_some_and(|p| {
            matches!(p.node().kind, NodeKind::Preformatted | NodeKind::Code)
        });
        if !in_code {
            return String::new();
        }
    }
    value.to_string()
}

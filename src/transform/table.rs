//! Table extraction.

use super::ancestry::Ancestry;
use super::Transformer;
use crate::model::{style_names, Alignment, Node, NodeKind, PrintNode, TableCell};
use regex::Regex;
use std::sync::OnceLock;

fn text_align_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)text-align\s*:\s*([a-z]+)").expect("text-align pattern is valid")
    })
}

/// Alignment declared in a cell's inline `style` attribute.
pub fn cell_alignment(cell: &Node) -> Alignment {
    let Some(style) = cell.attr("style") else {
        return Alignment::Left;
    };
    match text_align_regex()
        .captures(style)
        .map(|c| c[1].to_ascii_lowercase())
        .as_deref()
    {
        Some("center") => Alignment::Center,
        Some("right") => Alignment::Right,
        _ => Alignment::Left,
    }
}

/// The `thead` with its first row, and the last `tbody`.
fn table_parts(table: &Node) -> (Option<(&Node, &Node)>, Option<&Node>) {
    let mut head = None;
    let mut body = None;
    for child in &table.children {
        match child.kind {
            NodeKind::TableHead if head.is_none() => {
                head = child
                    .children
                    .iter()
                    .find(|c| c.kind == NodeKind::TableRow)
                    .map(|row| (child, row));
            }
            NodeKind::TableBody => body = Some(child),
            _ => {}
        }
    }
    (head, body)
}

impl Transformer<'_> {
    /// Convert a `table`, or omit it when the header or data rows are missing.
    pub(super) fn table(&mut self, frame: &Ancestry<'_>) -> Option<PrintNode> {
        let table = frame.node();
        let (Some((thead, head_row)), Some(body)) = table_parts(table) else {
            log::debug!("Omitting table without header row or body");
            self.stats.add_omitted_table();
            return None;
        };

        let head_frame = frame.child(thead);
        let row_frame = head_frame.child(head_row);
        let header: Vec<TableCell> = head_row
            .children
            .iter()
            .filter(|c| c.kind == NodeKind::TableHeaderCell)
            .map(|th| {
                let mut cell = self.cell(&row_frame, th);
                cell.styles.insert(0, style_names::TABLE_HEADER.to_string());
                cell
            })
            .collect();
        if header.is_empty() {
            log::debug!("Omitting table without header cells");
            self.stats.add_omitted_table();
            return None;
        }

        let body_frame = frame.child(body);
        let rows: Vec<Vec<TableCell>> = body
            .children
            .iter()
            .filter(|c| c.kind == NodeKind::TableRow)
            .map(|tr| {
                let row_frame = body_frame.child(tr);
                tr.children
                    .iter()
                    .filter(|c| c.kind == NodeKind::TableCell)
                    .map(|td| self.cell(&row_frame, td))
                    .collect()
            })
            .collect();
        if rows.is_empty() {
            log::debug!("Omitting table without data rows");
            self.stats.add_omitted_table();
            return None;
        }

        self.stats.add_table();
        Some(PrintNode::Table {
            column_count: header.len(),
            header,
            rows,
            header_rows: 1,
            styles: vec![style_names::TABLE.to_string()],
        })
    }

    fn cell(&mut self, row: &Ancestry<'_>, cell: &Node) -> TableCell {
        let frame = row.child(cell);
        let alignment = cell_alignment(cell);
        TableCell {
            content: self.parse_nodes(&cell.children, Some(&frame)),
            styles: alignment
                .style_name()
                .map(|s| vec![s.to_string()])
                .unwrap_or_default(),
            alignment,
        }
    }
}

//! Callout detection for blockquotes led by a bold keyword.

use super::ancestry::Ancestry;
use crate::model::{Admonition, KeywordTable, Node, NodeKind};

/// Resolve the callout variant of a blockquote.
///
/// Looks at the first element child, descending once through a paragraph.
/// If that is a bold run, its first text child is looked up in `keywords`.
pub fn resolve_blockquote(blockquote: &Node, keywords: &KeywordTable) -> Option<Admonition> {
    let mut first = blockquote.first_element_child()?;
    if first.kind == NodeKind::Paragraph {
        first = first.first_element_child()?;
    }
    if first.kind != NodeKind::Bold {
        return None;
    }
    keywords.lookup(label(first)?)
}

/// Variant whose color a bold run takes, if it leads a blockquote.
///
/// The run must sit in a blockquote directly or through one intermediate
/// node, and be the first element child of its parent.
pub fn bold_trigger(frame: &Ancestry<'_>, keywords: &KeywordTable) -> Option<Admonition> {
    if !(frame.parent_is(&NodeKind::Blockquote) || frame.grandparent_is(&NodeKind::Blockquote)) {
        return None;
    }
    let parent = frame.parent_node()?;
    let leading = parent.first_element_child()?;
    if !std::ptr::eq(leading, frame.node()) {
        return None;
    }
    keywords.lookup(label(frame.node())?)
}

fn label(bold: &Node) -> Option<&str> {
    bold.children
        .iter()
        .find(|c| c.is_text())
        .map(Node::text_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> Node {
        Node::element(NodeKind::Bold, vec![Node::text(text)])
    }

    fn quote(children: Vec<Node>) -> Node {
        Node::element(NodeKind::Blockquote, children)
    }

    fn para(children: Vec<Node>) -> Node {
        Node::element(NodeKind::Paragraph, children)
    }

    #[test]
    fn test_resolve_through_paragraph() {
        let keywords = KeywordTable::default();
        let node = quote(vec![
            Node::text("\n"),
            para(vec![bold(" Warning "), Node::text(" mind the gap")]),
        ]);
        assert_eq!(resolve_blockquote(&node, &keywords), Some(Admonition::Warning));
    }

    #[test]
    fn test_resolve_direct_bold() {
        let keywords = KeywordTable::default();
        let node = quote(vec![bold("tip")]);
        assert_eq!(resolve_blockquote(&node, &keywords), Some(Admonition::Hint));
    }

    #[test]
    fn test_resolve_no_keyword() {
        let keywords = KeywordTable::default();
        let node = quote(vec![para(vec![bold("not-a-keyword")])]);
        assert_eq!(resolve_blockquote(&node, &keywords), None);

        let node = quote(vec![para(vec![Node::text("Warning")])]);
        assert_eq!(resolve_blockquote(&node, &keywords), None);
    }

    #[test]
    fn test_resolve_empty_blockquote() {
        let keywords = KeywordTable::default();
        assert_eq!(resolve_blockquote(&quote(vec![]), &keywords), None);
        assert_eq!(resolve_blockquote(&quote(vec![para(vec![])]), &keywords), None);
        assert_eq!(
            resolve_blockquote(&quote(vec![Node::element(NodeKind::Bold, vec![])]), &keywords),
            None
        );
    }

    #[test]
    fn test_bold_trigger_first_element_only() {
        let keywords = KeywordTable::default();
        let node = quote(vec![para(vec![
            Node::text("  "),
            bold("Danger"),
            bold("Note"),
        ])]);

        let root = Ancestry::root(&node);
        let p = root.child(&node.children[0]);
        let first = p.child(&node.children[0].children[1]);
        let second = p.child(&node.children[0].children[2]);

        assert_eq!(bold_trigger(&first, &keywords), Some(Admonition::Danger));
        assert_eq!(bold_trigger(&second, &keywords), None);
    }

    #[test]
    fn test_bold_trigger_outside_blockquote() {
        let keywords = KeywordTable::default();
        let node = para(vec![bold("Warning")]);
        let root = Ancestry::root(&node);
        let b = root.child(&node.children[0]);
        assert_eq!(bold_trigger(&b, &keywords), None);
    }
}

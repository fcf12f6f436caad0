//! Mapping from syntax-highlighter classes to code styles.

/// Prefix marking a highlighter class token.
pub const HIGHLIGHT_PREFIX: &str = "hljs-";

/// Map a highlighter category (without prefix) to a style name.
pub fn classify(category: &str) -> Option<&'static str> {
    let style = match category {
        "doctag" | "keyword" | "template-tag" | "template-variable" | "type" => "codeKeyword",
        "title" => "codeTitle",
        "attr" | "attribute" | "literal" | "meta" | "number" | "operator" | "variable"
        | "selector-attr" | "selector-class" | "selector-id" => "codeVariable",
        "regexp" | "string" => "codeString",
        "built_in" | "symbol" => "codeSymbol",
        "comment" | "code" | "formula" => "codeComment",
        "name" | "quote" | "selector-tag" | "selector-pseudo" => "codeName",
        "subst" => "codeSubst",
        "section" => "codeSection",
        "bullet" => "codeBullet",
        "emphasis" => "codeEmphasis",
        "strong" => "codeStrong",
        "addition" => "codeAddition",
        "deletion" => "codeDeletion",
        _ => return None,
    };
    Some(style)
}

/// Category named by a `class` attribute value.
///
/// The last prefixed token wins.
pub fn highlight_class(class_attr: &str) -> Option<&str> {
    class_attr
        .split(' ')
        .filter_map(|token| token.strip_prefix(HIGHLIGHT_PREFIX))
        .last()
}

//! Admonition variants and their trigger words.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Callout variant of a blockquote.
///
/// Ordering is the lookup order of [`KeywordTable::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Admonition {
    Info,
    Hint,
    Warning,
    Danger,
}

impl Admonition {
    /// All variants in lookup order.
    pub const ALL: [Admonition; 4] = [
        Admonition::Info,
        Admonition::Hint,
        Admonition::Warning,
        Admonition::Danger,
    ];

    /// Name of the style carrying this variant's fill and border colors.
    pub fn style_name(self) -> &'static str {
        match self {
            Admonition::Info => "info",
            Admonition::Hint => "hint",
            Admonition::Warning => "warning",
            Admonition::Danger => "danger",
        }
    }
}

impl fmt::Display for Admonition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style_name())
    }
}

/// Lowercase trigger words per admonition variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable(BTreeMap<Admonition, BTreeSet<String>>);

impl KeywordTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add trigger words for a variant and return self.
    ///
    /// Words are stored lowercase.
    pub fn with<I, S>(mut self, variant: Admonition, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0
            .entry(variant)
            .or_default()
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Find the variant whose words contain `label`, after trimming and
    /// lowercasing. The first variant in [`Admonition::ALL`] order wins.
    pub fn lookup(&self, label: &str) -> Option<Admonition> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }
        self.0
            .iter()
            .find(|(_, words)| words.contains(&label))
            .map(|(variant, _)| *variant)
    }

    /// Trigger words of a variant.
    pub fn words(&self, variant: Admonition) -> impl Iterator<Item = &str> {
        self.0
            .get(&variant)
            .into_iter()
            .flat_map(|words| words.iter().map(String::as_str))
    }

    /// Check if the table has no words at all.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        KeywordTable::empty()
            .with(Admonition::Info, ["info", "note", "information"])
            .with(
                Admonition::Hint,
                ["hint", "tip", "conseil", "indice", "suggestion"],
            )
            .with(
                Admonition::Warning,
                ["warning", "caution", "watch-out", "attention", "avertissement"],
            )
            .with(
                Admonition::Danger,
                [
                    "danger",
                    "error",
                    "issue",
                    "problem",
                    "alert",
                    "erreur",
                    "problème",
                    "alerte",
                ],
            )
    }
}

use std::fmt;

use crate::constants::{HYPHEN, SEGMENT_MARKER};
use crate::util::strip_segmentation;

/// A compound lemma with an explicit boundary between its parts.
///
/// The parts may still carry Gertwol decoration (e.g. *klett~er*), which
/// is removed when the lemma is formatted.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Compound {
    prefix: String,
    suffix: String,
}

impl Compound {
    /// Construct a compound from its parts.
    ///
    /// A hyphen at the end of the prefix or at the start of the suffix is
    /// the hyphen of the truncation and is removed. Returns `None` if
    /// either part is empty.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Option<Self> {
        let mut prefix = prefix.into();
        let mut suffix = suffix.into();

        if prefix.ends_with(HYPHEN) {
            prefix.pop();
        }

        if suffix.starts_with(HYPHEN) {
            suffix.remove(0);
        }

        if strip_segmentation(&prefix).is_empty() || strip_segmentation(&suffix).is_empty() {
            return None;
        }

        Some(Compound { prefix, suffix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The compound as a single word, as it would occur in running text.
    ///
    /// *Wald* + *Wege* is *Waldwege*, *Wald* + *n#Wege* is *Waldnwege*.
    pub fn surface(&self) -> String {
        let mut surface = strip_segmentation(&self.prefix);
        surface.push_str(&strip_segmentation(&self.suffix).to_lowercase());
        surface
    }

    /// The segmented lemma, e.g. *Wald#Wege*.
    pub fn lemma(&self) -> String {
        format!(
            "{}{}{}",
            strip_segmentation(&self.prefix),
            SEGMENT_MARKER,
            strip_segmentation(&self.suffix)
        )
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.lemma())
    }
}

/// The result of resolving a truncation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The truncation is resolved to a compound lemma.
    Resolved(Compound),

    /// Competing lemmas could not be ranked.
    Undecidable,

    /// No lemma could be constructed.
    Unchanged,
}

impl Resolution {
    pub(crate) fn from_compound(compound: Option<Compound>) -> Self {
        compound.map(Resolution::Resolved).unwrap_or(Resolution::Unchanged)
    }

    pub fn compound(&self) -> Option<&Compound> {
        match self {
            Resolution::Resolved(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

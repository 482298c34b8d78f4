//! Compositional suffixes of (mostly Swiss) place names.
//!
//! Place names are rarely in the compound table, but many of them end in
//! a small set of heads, such as *-tal* or *-gletscher*. These heads are
//! used to split unknown compounds, normalizing inflected or archaic
//! spellings (*Thäler* → *Tal*).

use lazy_static::lazy_static;

use crate::util::{char_len, take_chars};

/// A head with its spelling variants.
pub struct SuffixRule {
    variants: &'static [&'static str],
    canonical: &'static str,
}

impl SuffixRule {
    pub const fn new(variants: &'static [&'static str], canonical: &'static str) -> Self {
        SuffixRule {
            variants,
            canonical,
        }
    }

    /// Split a word that ends in one of the variants.
    ///
    /// Returns the remainder of the word with the canonical head. Words
    /// that consist of only the head are not split.
    pub fn split<'a>(&self, word: &'a str) -> Option<(&'a str, &'static str)> {
        self.variants.iter().find_map(|variant| {
            if !word.ends_with(variant) {
                return None;
            }

            let remainder = take_chars(word, char_len(word) - char_len(variant));
            if remainder.is_empty() {
                None
            } else {
                Some((remainder, self.canonical))
            }
        })
    }
}

lazy_static! {
    pub static ref GEOGRAPHIC_SUFFIXES: Vec<SuffixRule> = vec![
        SuffixRule::new(&["tal", "tals", "tales"], "tal"),
        SuffixRule::new(&["Tal", "Tals", "Tales"], "Tal"),
        SuffixRule::new(&["thal", "thals", "thales", "thale"], "tal"),
        SuffixRule::new(&["Thal", "Thals", "Thales", "Thale"], "Tal"),
        SuffixRule::new(&["thäler", "thälern"], "tal"),
        SuffixRule::new(&["täler", "tälern"], "tal"),
        SuffixRule::new(&["Thäler", "Thälern"], "Tal"),
        SuffixRule::new(&["Täler", "Tälern"], "Tal"),
        SuffixRule::new(&["alp"], "alp"),
        SuffixRule::new(&["pass"], "pass"),
        SuffixRule::new(&["Pass"], "Pass"),
        SuffixRule::new(&["gletscher"], "gletscher"),
        SuffixRule::new(&["gebiet"], "gebiet"),
        SuffixRule::new(&["Gebiet"], "Gebiet"),
        SuffixRule::new(&["Massiv"], "Massiv"),
    ];
}

/// Split a word before a geographic head, using the first matching rule.
pub fn split_geographic(word: &str) -> Option<(&str, &'static str)> {
    GEOGRAPHIC_SUFFIXES
        .iter()
        .find_map(|rule| rule.split(word))
}

/// Split a lemma that ends in the canonical *tal* or *Tal*.
///
/// A bare *Tal* is split into an empty beginning and the head.
pub(crate) fn split_valley_lemma(lemma: &str) -> Option<(&str, &'static str)> {
    GEOGRAPHIC_SUFFIXES[..2].iter().find_map(|rule| {
        if lemma == rule.canonical {
            Some(("", rule.canonical))
        } else if lemma.ends_with(rule.canonical) {
            rule.split(lemma)
        } else {
            None
        }
    })
}

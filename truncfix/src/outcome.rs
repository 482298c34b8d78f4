//! Bookkeeping of truncations that could not be resolved.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use crate::pattern::Pattern;

/// Reason why a truncation was left unresolved.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Category {
    /// Brute-force splitting found split points, but none of the
    /// resulting words is attested in the corpus.
    UnattestedSplit { reversed: bool },

    /// The compound is too short to be split by brute force.
    ShortCompound { reversed: bool },

    /// Competing lemmas could not be ranked by frequency.
    Undecidable(Pattern),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Category::*;

        let direction = |reversed: bool| if reversed { "_reversed" } else { "" };

        match self {
            UnattestedSplit { reversed } => {
                write!(f, "split_compound{}_unattested", direction(*reversed))
            }
            ShortCompound { reversed } => {
                write!(f, "split_compound{}_too_short", direction(*reversed))
            }
            Undecidable(pattern) => write!(f, "undecidable_{}", pattern),
        }
    }
}

/// Counts of unresolved truncations per category.
///
/// The counts are purely diagnostic; they never influence resolution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Outcomes {
    counts: BTreeMap<Category, usize>,
}

impl Outcomes {
    /// Record an unresolved truncation.
    pub fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    /// The number of truncations recorded for a category.
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// The total number of recorded truncations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Add the counts of another tracker to this tracker.
    pub fn merge(&mut self, other: &Outcomes) {
        for (&category, &count) in &other.counts {
            *self.counts.entry(category).or_insert(0) += count;
        }
    }

    /// Counts per category.
    pub fn summary(&self) -> &BTreeMap<Category, usize> {
        &self.counts
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Category, usize> {
        self.counts.iter()
    }
}

impl<'a> IntoIterator for &'a Outcomes {
    type Item = (&'a Category, &'a usize);
    type IntoIter = btree_map::Iter<'a, Category, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Report of a resolver run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    changed: usize,
    outcomes: Outcomes,
}

impl Report {
    /// The number of truncation lemmas that were replaced.
    pub fn changed(&self) -> usize {
        self.changed
    }

    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    pub(crate) fn outcomes_mut(&mut self) -> &mut Outcomes {
        &mut self.outcomes
    }

    pub(crate) fn count_change(&mut self) {
        self.changed += 1;
    }

    /// Accumulate the report of another run, e.g. of the next sentence.
    pub fn merge(&mut self, other: &Report) {
        self.changed += other.changed;
        self.outcomes.merge(&other.outcomes);
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Outcomes, Report};
    use crate::pattern::Pattern;

    #[test]
    fn counts_per_category() {
        let mut outcomes = Outcomes::default();
        outcomes.record(Category::Undecidable(Pattern::Noun));
        outcomes.record(Category::Undecidable(Pattern::Noun));
        outcomes.record(Category::ShortCompound { reversed: true });

        assert_eq!(outcomes.count(Category::Undecidable(Pattern::Noun)), 2);
        assert_eq!(outcomes.count(Category::ShortCompound { reversed: true }), 1);
        assert_eq!(outcomes.count(Category::ShortCompound { reversed: false }), 0);
        assert_eq!(outcomes.total(), 3);
    }

    #[test]
    fn merges_reports() {
        let mut first = Report::default();
        first.count_change();
        first
            .outcomes_mut()
            .record(Category::UnattestedSplit { reversed: false });

        let mut second = Report::default();
        second.count_change();
        second
            .outcomes_mut()
            .record(Category::UnattestedSplit { reversed: false });

        first.merge(&second);
        assert_eq!(first.changed(), 2);
        assert_eq!(
            first
                .outcomes()
                .count(Category::UnattestedSplit { reversed: false }),
            2
        );
    }

    #[test]
    fn category_names() {
        assert_eq!(
            Category::UnattestedSplit { reversed: true }.to_string(),
            "split_compound_reversed_unattested"
        );
        assert_eq!(
            Category::ShortCompound { reversed: false }.to_string(),
            "split_compound_too_short"
        );
        assert_eq!(
            Category::Undecidable(Pattern::PrepositionalPhrase).to_string(),
            "undecidable_pattern_4"
        );
    }
}

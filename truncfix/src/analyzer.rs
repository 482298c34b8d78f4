//! Analysis of the compound that completes a truncation.

use crate::constants::HYPHEN;
use crate::outcome::{Category, Outcomes};
use crate::tables::FrequencyTable;
use crate::util::{char_len, skip_chars, take_chars};

/// The minimum length of a part found by brute-force splitting.
const MIN_PART_LEN: usize = 3;

/// How a compound relates to the truncation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    /// The truncation borrows the tail of a noun compound.
    Noun,

    /// The truncation borrows the tail of an adjective or other non-nominal
    /// compound. Adjectives are also split at `~`.
    Adjective,

    /// The truncation (*-wanderer*) borrows the head of the compound.
    Reversed,
}

impl Variant {
    fn is_reversed(self) -> bool {
        self == Variant::Reversed
    }
}

/// Split a compound into segments.
///
/// `form` is the Gertwol analysis of the compound if there is one, or
/// its lemma or form otherwise. Gertwol boundaries are used in order of
/// preference: `#`, inner hyphens, `|`, and for adjectives `~`. Hyphens
/// stay attached to the segments on the side of the truncation.
///
/// Without boundaries, the compound is split by brute force, guided by
/// the corpus frequencies of the words that the truncation would form.
/// In that case a single segment is returned, or none if no split is
/// attested.
pub fn analyze(
    form: &str,
    trunc: &str,
    variant: Variant,
    frequencies: &FrequencyTable,
    outcomes: &mut Outcomes,
) -> Vec<String> {
    if form.contains('#') {
        return split_owned(form, '#');
    }

    if has_inner_hyphen(form) {
        let parts: Vec<_> = form.split(HYPHEN).collect();
        return if variant.is_reversed() {
            parts[..parts.len() - 1]
                .iter()
                .map(|part| format!("{}{}", part, HYPHEN))
                .collect()
        } else {
            parts[1..]
                .iter()
                .map(|part| format!("{}{}", HYPHEN, part))
                .collect()
        };
    }

    if form.contains('|') {
        return split_owned(form, '|');
    }

    if variant == Variant::Adjective && form.contains('~') {
        return split_owned(form, '~');
    }

    let split = if variant.is_reversed() {
        split_head(form, trunc, frequencies)
    } else {
        split_tail(form, trunc, frequencies)
    };

    match split {
        Ok(segment) => vec![segment],
        Err(category) => {
            log::trace!("Cannot split '{}' for '{}': {}", form, trunc, category);
            outcomes.record(category);
            Vec::new()
        }
    }
}

fn split_owned(form: &str, delimiter: char) -> Vec<String> {
    form.split(delimiter).map(ToOwned::to_owned).collect()
}

fn has_inner_hyphen(form: &str) -> bool {
    let len = char_len(form);
    len > 2 && skip_chars(take_chars(form, len - 1), 1).contains(HYPHEN)
}

/// Find the tail of `compound` that the truncation borrows.
///
/// Every tail that leaves at least three characters on either side of
/// the boundary is attached to the truncated stem. The tail of the most
/// frequent word wins; of equally frequent words the longest tail wins.
fn split_tail(
    compound: &str,
    trunc: &str,
    frequencies: &FrequencyTable,
) -> Result<String, Category> {
    let stem = trunc.strip_suffix(HYPHEN).unwrap_or(trunc);
    let len = char_len(compound);

    let candidates = (MIN_PART_LEN..=len.saturating_sub(MIN_PART_LEN))
        .map(|border| skip_chars(compound, border))
        .map(|tail| (tail, frequencies.frequency(&format!("{}{}", stem, tail))));

    best_candidate(candidates)
        .ok_or(Category::ShortCompound { reversed: false })?
        .ok_or(Category::UnattestedSplit { reversed: false })
}

/// Find the head of `compound` that the truncation borrows.
///
/// This mirrors `split_tail`: the longest heads are tried first. The
/// compound itself is also a candidate head, since the first conjunct of
/// a reversed truncation need not be a compound (*Wiesen und -wege*).
fn split_head(
    compound: &str,
    trunc: &str,
    frequencies: &FrequencyTable,
) -> Result<String, Category> {
    let stem = trunc.strip_prefix(HYPHEN).unwrap_or(trunc);
    let whole = compound.trim_end_matches(HYPHEN);
    let len = char_len(compound);

    let whole_candidate = if char_len(whole) >= MIN_PART_LEN {
        Some(whole)
    } else {
        None
    };

    let candidates = whole_candidate
        .into_iter()
        .chain(
            (MIN_PART_LEN..=len.saturating_sub(MIN_PART_LEN))
                .rev()
                .map(|border| take_chars(compound, border)),
        )
        .map(|head| (head, frequencies.frequency(&format!("{}{}", head, stem))));

    best_candidate(candidates)
        .ok_or(Category::ShortCompound { reversed: true })?
        .ok_or(Category::UnattestedSplit { reversed: true })
}

/// Pick the most frequent candidate, preferring earlier candidates on ties.
///
/// Returns `None` if there are no candidates, `Some(None)` if no candidate
/// is attested.
fn best_candidate<'a>(
    candidates: impl Iterator<Item = (&'a str, usize)>,
) -> Option<Option<String>> {
    let mut best: Option<(&str, usize)> = None;

    for (segment, freq) in candidates {
        match best {
            Some((_, best_freq)) if best_freq >= freq => (),
            _ => best = Some((segment, freq)),
        }
    }

    best.map(|(segment, freq)| {
        if freq == 0 {
            None
        } else {
            Some(segment.to_owned())
        }
    })
}

#[cfg(test)]
mod tests {
    use std::iter::FromIterator;

    use maplit::hashmap;

    use super::{analyze, Variant};
    use crate::outcome::{Category, Outcomes};
    use crate::tables::FrequencyTable;

    fn frequencies() -> FrequencyTable {
        FrequencyTable::from_iter(hashmap! {
            "Waldwege" => 5,
            "Waldnwege" => 1,
            "Wiesenwege" => 9,
            "Bergwanderer" => 3,
            "Sommerreifen" => 20,
        })
    }

    fn analyze_default(form: &str, trunc: &str, variant: Variant) -> (Vec<String>, Outcomes) {
        let mut outcomes = Outcomes::default();
        let segments = analyze(form, trunc, variant, &frequencies(), &mut outcomes);
        (segments, outcomes)
    }

    #[test]
    fn splits_at_gertwol_boundaries() {
        assert_eq!(
            analyze_default("Wiese#n#Wege", "Wald-", Variant::Noun).0,
            vec!["Wiese", "n", "Wege"]
        );
        assert_eq!(
            analyze_default("Schnee|grenze", "Wald-", Variant::Noun).0,
            vec!["Schnee", "grenze"]
        );
    }

    #[test]
    fn only_adjectives_split_at_tilde() {
        assert_eq!(
            analyze_default("wunder~bar", "furcht-", Variant::Adjective).0,
            vec!["wunder", "bar"]
        );

        let (segments, outcomes) = analyze_default("wunder~bar", "furcht-", Variant::Noun);
        assert!(segments.is_empty());
        assert_eq!(outcomes.total(), 1);
    }

    #[test]
    fn hyphens_stay_on_truncation_side() {
        assert_eq!(
            analyze_default("EU-Staaten", "Nicht-", Variant::Noun).0,
            vec!["-Staaten"]
        );
        assert_eq!(
            analyze_default("EU-Staaten", "-Bürger", Variant::Reversed).0,
            vec!["EU-"]
        );
        // Leading and trailing hyphens are not boundaries.
        let (segments, _) = analyze_default("-wege", "Wald-", Variant::Noun);
        assert!(segments.is_empty());
    }

    #[test]
    fn brute_force_picks_most_frequent_tail() {
        let (segments, outcomes) = analyze_default("Wiesenwege", "Wald-", Variant::Noun);
        assert_eq!(segments, vec!["wege"]);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn brute_force_picks_most_frequent_head() {
        let (segments, _) = analyze_default("Bergsteiger", "-wanderer", Variant::Reversed);
        assert_eq!(segments, vec!["Berg"]);

        let (segments, _) = analyze_default("Wiesen", "-wege", Variant::Reversed);
        assert_eq!(segments, vec!["Wiesen"]);
    }

    #[test]
    fn unattested_split_is_recorded() {
        let (segments, outcomes) = analyze_default("Feldwege", "Acker-", Variant::Noun);
        assert!(segments.is_empty());
        assert_eq!(
            outcomes.count(Category::UnattestedSplit { reversed: false }),
            1
        );
    }

    #[test]
    fn short_compound_is_recorded() {
        let (segments, outcomes) = analyze_default("Wege", "Wald-", Variant::Noun);
        assert!(segments.is_empty());
        assert_eq!(outcomes.count(Category::ShortCompound { reversed: false }), 1);

        let (segments, outcomes) = analyze_default("ab", "-zu", Variant::Reversed);
        assert!(segments.is_empty());
        assert_eq!(outcomes.count(Category::ShortCompound { reversed: true }), 1);
    }
}

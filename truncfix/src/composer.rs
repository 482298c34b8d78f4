//! Composition of truncation lemmas from compound segments.

use std::cmp::Ordering;

use crate::constants::{HYPHEN, MERGE_MARKER, SEGMENT_MARKER};
use crate::outcome::{Category, Outcomes};
use crate::pattern::Pattern;
use crate::resolution::{Compound, Resolution};
use crate::suffix::split_valley_lemma;
use crate::tables::{FrequencyTable, Tables, TaggedReference};
use crate::token::TokenSequence;
use crate::util::{rfind_chars, strip_all, strip_decoration, strip_segmentation, take_chars};
use crate::verifier::verify;

/// Compose the lemma of a truncation that borrows the tail of a compound.
///
/// The truncated stem is combined with the last segment. If there are
/// three or more segments, the stem is also combined with the last two
/// segments and the more frequent compound is used. Equal frequencies
/// make the truncation undecidable.
///
/// The lemma of the companion takes precedence when it is segmented, or
/// when it ends in *tal*.
pub fn compose(
    trunc: &str,
    segments: &[String],
    companion_lemma: &str,
    pattern: Pattern,
    frequencies: &FrequencyTable,
    outcomes: &mut Outcomes,
) -> Resolution {
    let stem = trunc.strip_suffix(HYPHEN).unwrap_or(trunc);

    let resolution = match segments {
        [] => Resolution::Unchanged,
        [_, .., second_last, last] => rank_pair(
            Compound::new(stem, last.as_str()),
            Compound::new(stem, format!("{}{}", second_last, last)),
            pattern,
            frequencies,
            outcomes,
        ),
        [.., last] => Resolution::from_compound(Compound::new(stem, last.as_str())),
    };

    match companion_head(companion_lemma)
        .and_then(|head| Compound::new(strip_decoration(stem), head))
    {
        Some(compound) => Resolution::Resolved(compound),
        None => resolution,
    }
}

/// The head of a companion lemma that overrides the composed head.
fn companion_head(lemma: &str) -> Option<&str> {
    if lemma.contains(SEGMENT_MARKER) {
        lemma.rsplit(SEGMENT_MARKER).next()
    } else {
        split_valley_lemma(lemma).map(|(_, head)| head)
    }
}

/// Compose the lemma of a reversed truncation, which borrows the head of
/// a compound (*Bergsteiger und -wanderer*).
pub fn compose_reversed(
    trunc: &str,
    segments: &[String],
    companion_lemma: &str,
    pattern: Pattern,
    tables: &Tables,
    outcomes: &mut Outcomes,
) -> Resolution {
    let stem = trunc.strip_prefix(HYPHEN).unwrap_or(trunc);

    let mut resolution = match segments {
        [] => Resolution::Unchanged,
        [first, second, _, ..] => rank_pair(
            Compound::new(first.as_str(), stem),
            Compound::new(format!("{}{}", first, second), stem),
            pattern,
            tables.frequencies(),
            outcomes,
        ),
        [first, ..] => Resolution::from_compound(Compound::new(first.as_str(), stem)),
    };

    // Use the analysis of the borrowed head, if it is known.
    if let Resolution::Resolved(compound) = &resolution {
        if let Some(segmented) = tables.compounds().get_ignore_case(compound.suffix()) {
            let suffix = strip_all(segmented).to_lowercase();
            resolution = Resolution::from_compound(Compound::new(compound.prefix(), suffix));
        }
    }

    if let Some((prefix, _)) = companion_lemma.split_once(SEGMENT_MARKER) {
        let suffix = tables
            .tagged()
            .find_match(stem)
            .map(|entry| entry.lemma())
            .unwrap_or(stem);
        if let Some(compound) = Compound::new(prefix, suffix) {
            resolution = Resolution::Resolved(compound);
        }
    }

    resolution
}

fn rank_pair(
    first: Option<Compound>,
    second: Option<Compound>,
    pattern: Pattern,
    frequencies: &FrequencyTable,
    outcomes: &mut Outcomes,
) -> Resolution {
    let frequency = |compound: &Option<Compound>| {
        compound
            .as_ref()
            .map(|compound| frequencies.frequency(&compound.surface()))
            .unwrap_or(0)
    };

    match frequency(&first).cmp(&frequency(&second)) {
        Ordering::Greater => Resolution::from_compound(first),
        Ordering::Less => Resolution::from_compound(second),
        Ordering::Equal => undecidable(pattern, outcomes),
    }
}

/// Rank competing compounds by frequency.
///
/// Identical compounds are merged. The truncation is undecidable when
/// none of the compounds is attested, or when several compounds share
/// the highest frequency.
pub fn rank(
    compounds: impl IntoIterator<Item = Compound>,
    pattern: Pattern,
    frequencies: &FrequencyTable,
    outcomes: &mut Outcomes,
) -> Resolution {
    let mut ranked: Vec<(Compound, usize)> = Vec::new();
    for compound in compounds {
        if ranked.iter().all(|(other, _)| *other != compound) {
            let freq = frequencies.frequency(&compound.surface());
            ranked.push((compound, freq));
        }
    }

    let max_freq = match ranked.iter().map(|(_, freq)| *freq).max() {
        Some(max_freq) => max_freq,
        None => return Resolution::Undecidable,
    };

    let mut best = ranked.into_iter().filter(|(_, freq)| *freq == max_freq);
    match (best.next(), best.next()) {
        (Some((compound, _)), None) if max_freq > 0 => Resolution::Resolved(compound),
        _ => undecidable(pattern, outcomes),
    }
}

fn undecidable(pattern: Pattern, outcomes: &mut Outcomes) -> Resolution {
    log::trace!("Truncation is undecidable in {}", pattern);
    outcomes.record(Category::Undecidable(pattern));
    Resolution::Undecidable
}

/// A compound that a truncation could borrow from the token at
/// `companion`.
#[derive(Clone, Debug)]
pub(crate) struct Candidate {
    pub(crate) compound: Compound,
    pub(crate) companion: usize,
}

impl Candidate {
    pub(crate) fn from_resolution(resolution: Resolution, companion: usize) -> Option<Self> {
        match resolution {
            Resolution::Resolved(compound) => Some(Candidate {
                compound,
                companion,
            }),
            _ => None,
        }
    }
}

/// Resolve an undecidable truncation with the tagged reference.
///
/// Tried in order:
///
/// 1. The first candidate whose surface form occurs in a reference
///    surface. The lemma of its companion is verified.
/// 2. The first candidate whose head or surface form is a reference
///    surface, or otherwise the first candidate. The lemma of its
///    companion is segmented at the last occurrence of the first
///    `anchor_len` characters of the head.
///
/// The second step is skipped when the truncation at `trunc` already has
/// a segmented lemma.
pub(crate) fn resolve_by_reference(
    sentence: &mut dyn TokenSequence,
    trunc: usize,
    candidates: &[Candidate],
    tagged: &TaggedReference,
    anchor_len: usize,
) -> Resolution {
    let contained = tagged.iter().find_map(|entry| {
        let surface = entry.surface().to_lowercase();
        candidates
            .iter()
            .find(|candidate| surface.contains(&candidate.compound.surface().to_lowercase()))
    });

    if let Some(candidate) = contained {
        let resolution = Resolution::Resolved(candidate.compound.clone());
        verify(&resolution, sentence, candidate.companion);
        return resolution;
    }

    let trunc_lemma = sentence.token(trunc).lemma();
    if trunc_lemma.contains(SEGMENT_MARKER) || trunc_lemma.contains(MERGE_MARKER) {
        return Resolution::Undecidable;
    }

    let candidate = match tagged
        .iter()
        .find_map(|entry| {
            let surface = entry.surface().to_lowercase();
            candidates.iter().find(|candidate| {
                strip_all(candidate.compound.suffix()).to_lowercase() == surface
                    || candidate.compound.surface().to_lowercase() == surface
            })
        })
        .or_else(|| candidates.first())
    {
        Some(candidate) => candidate,
        None => return Resolution::Undecidable,
    };

    segment_companion(sentence, candidate, anchor_len);

    Resolution::Resolved(candidate.compound.clone())
}

fn segment_companion(sentence: &mut dyn TokenSequence, candidate: &Candidate, anchor_len: usize) {
    let lemma = sentence.token(candidate.companion).lemma();
    if lemma.contains(SEGMENT_MARKER) {
        return;
    }

    let suffix = candidate.compound.suffix();
    let anchor = strip_decoration(take_chars(suffix, anchor_len));
    if anchor.is_empty() {
        return;
    }

    let border = match rfind_chars(lemma, &anchor) {
        Some(border) => border,
        None => return,
    };

    let beginning = strip_decoration(take_chars(lemma, border).trim_end_matches(HYPHEN));
    if beginning.is_empty() {
        return;
    }

    let lemma = format!(
        "{}{}{}",
        beginning,
        SEGMENT_MARKER,
        strip_segmentation(suffix)
    );
    log::trace!("Segmented companion lemma: {}", lemma);
    sentence.token_mut(candidate.companion).set_lemma(lemma);
}

//! The analysable form of the compound that completes a truncation.
//!
//! The companion compound is analysed through its Gertwol analysis if
//! there is one, or its lemma otherwise. Words that the lemmatizer did not
//! know are analysed through their surface form. Their lemmas are
//! repaired on the way, by splitting them with the tagged reference, the
//! geographic suffixes, and the compound table.

use crate::constants::{HYPHEN, MERGE_MARKER, SEGMENT_MARKER, TRUNCATED_TAG};
use crate::suffix::split_geographic;
use crate::tables::{CompoundTable, TaggedEntry, TaggedReference, Tables};
use crate::token::TokenSequence;
use crate::util::{
    char_len, skip_chars, strip_decoration, strip_segmentation, take_chars, title_case,
};

/// The minimum length of a compound part found in the compound table.
const MIN_DICTIONARY_PART_LEN: usize = 3;

/// Get the analysable form of the token at `idx`.
///
/// If the token's lemma is one of `unknown_lemmas`, its lemma is replaced
/// by a segmented lemma (*Süd#tal*), or by its form when it cannot be
/// split. The lemmas of truncated words are left alone.
pub(crate) fn companion_form(
    sentence: &mut dyn TokenSequence,
    idx: usize,
    tables: &Tables,
    unknown_lemmas: &[String],
) -> String {
    let token = sentence.token(idx);
    let form = token.form().trim().to_owned();

    if let Some(segmented) = tables.compounds().get(&form) {
        return segmented.trim().to_owned();
    }

    if !unknown_lemmas.iter().any(|unknown| unknown == token.lemma()) {
        return token.lemma().to_owned();
    }

    // Truncations get their lemmas from resolution.
    if form.starts_with(HYPHEN) || form.ends_with(HYPHEN) {
        return form;
    }

    let lemma = split_unknown(sentence, idx, tables).unwrap_or_else(|| form.clone());
    log::trace!("Lemma of unknown word '{}': {}", form, lemma);
    sentence.token_mut(idx).set_lemma(lemma);

    form
}

/// Split the word at `idx` into a segmented lemma.
fn split_unknown(sentence: &dyn TokenSequence, idx: usize, tables: &Tables) -> Option<String> {
    let token = sentence.token(idx);
    let word = token.form().trim();
    let hyphenated = word.contains(HYPHEN);

    let split = split_by_reference(word, tables.tagged())
        .or_else(|| {
            split_geographic(word)
                .map(|(beginning, ending)| (beginning.to_owned(), ending.to_owned()))
        })
        .or_else(|| {
            if hyphenated || token.xpos() == TRUNCATED_TAG {
                return None;
            }

            let neighbour = idx.checked_sub(2).map(|pos| sentence.token(pos).lemma());
            split_unhyphenated(word, neighbour, tables)
        })
        .or_else(|| {
            if hyphenated {
                split_hyphenated(word, tables.tagged())
            } else {
                None
            }
        })?;

    join_split(split)
}

fn join_split((beginning, ending): (String, String)) -> Option<String> {
    let beginning = strip_decoration(beginning.strip_suffix(HYPHEN).unwrap_or(beginning.as_str()));
    let ending = strip_decoration(ending.strip_prefix(HYPHEN).unwrap_or(ending.as_str()));

    if beginning.is_empty() || ending.is_empty() {
        None
    } else {
        Some(format!("{}{}{}", beginning, SEGMENT_MARKER, ending))
    }
}

/// Split a word that is in the tagged reference as a compound.
fn split_by_reference(word: &str, tagged: &TaggedReference) -> Option<(String, String)> {
    tagged
        .iter()
        .filter(|entry| entry.matches(word))
        .find_map(|entry| {
            let segmented = strip_decoration(entry.segmented());
            let (beginning, _) = segmented
                .split_once(SEGMENT_MARKER)
                .or_else(|| segmented.split_once(MERGE_MARKER))?;
            Some((
                beginning.to_owned(),
                entry.lemma_tail(char_len(beginning)).to_owned(),
            ))
        })
}

fn split_unhyphenated(
    word: &str,
    neighbour: Option<&str>,
    tables: &Tables,
) -> Option<(String, String)> {
    if let Some(split) =
        neighbour.and_then(|neighbour| split_by_neighbour(word, neighbour, tables.tagged()))
    {
        return Some(split);
    }

    let (beginning, ending) = split_by_dictionary_suffix(word, tables.compounds())
        .or_else(|| split_by_dictionary_prefix(word, tables))?;

    let ending = match neighbour {
        Some(neighbour) => lemmatize_ending(neighbour, ending, tables.tagged()),
        None => ending,
    };

    Some((beginning, ending))
}

/// Split a word such that its ending forms a tagged compound with the
/// first part of the lemma two tokens back.
///
/// In *Bergsteiger und Talwanderer*, *Talwanderer* is split into *Tal* and
/// *wanderer* when *Bergwanderer* is in the tagged reference.
fn split_by_neighbour(
    word: &str,
    neighbour: &str,
    tagged: &TaggedReference,
) -> Option<(String, String)> {
    let stem = neighbour_stem(neighbour);
    let stem_len = char_len(&stem);

    tagged.iter().find_map(|entry| {
        (1..char_len(word)).find_map(|border| {
            let candidate = format!("{}{}", stem, skip_chars(word, border));
            if entry.matches(&candidate) {
                Some((
                    take_chars(word, border).to_owned(),
                    entry.lemma_tail(stem_len).to_owned(),
                ))
            } else {
                None
            }
        })
    })
}

fn neighbour_stem(neighbour: &str) -> String {
    if neighbour.contains(HYPHEN) {
        neighbour.replace(HYPHEN, "")
    } else {
        neighbour
            .split(SEGMENT_MARKER)
            .next()
            .unwrap_or(neighbour)
            .to_owned()
    }
}

/// Split off the longest ending that is in the compound table.
fn split_by_dictionary_suffix(word: &str, compounds: &CompoundTable) -> Option<(String, String)> {
    (1..char_len(word)).find_map(|border| {
        let ending = skip_chars(word, border);
        if char_len(ending) < MIN_DICTIONARY_PART_LEN {
            return None;
        }

        if !compounds.contains(&ending.to_lowercase()) && !compounds.contains(&title_case(ending)) {
            return None;
        }

        let ending = refine_ending(ending, compounds).unwrap_or_else(|| ending.to_owned());
        Some((take_chars(word, border).to_owned(), ending))
    })
}

/// Replace an ending by the similar head of an analysed compound that
/// contains it.
fn refine_ending(ending: &str, compounds: &CompoundTable) -> Option<String> {
    compounds
        .iter()
        .filter(|(form, _)| form.contains(ending))
        .find_map(|(_, segmented)| {
            let (_, head) = segmented.rsplit_once(SEGMENT_MARKER)?;
            let len_diff = char_len(head) as isize - char_len(ending) as isize;
            if take_chars(head, 2) == take_chars(ending, 2) && len_diff.abs() < 4 {
                Some(strip_segmentation(head))
            } else {
                None
            }
        })
}

/// Split off the longest beginning that is the first part of an analysed
/// compound.
fn split_by_dictionary_prefix(word: &str, tables: &Tables) -> Option<(String, String)> {
    (MIN_DICTIONARY_PART_LEN..char_len(word))
        .rev()
        .find_map(|border| {
            let beginning = take_chars(word, border);
            let marked = format!("{}{}", beginning, SEGMENT_MARKER);

            let attested = tables.compounds().iter().any(|(form, segmented)| {
                let first = segmented.split(SEGMENT_MARKER).next().unwrap_or(segmented);
                form.contains(beginning)
                    && segmented.contains(&marked)
                    && take_chars(first, 2) == take_chars(beginning, 2)
            });

            if !attested {
                return None;
            }

            let ending = skip_chars(word, border);
            let ending = tables
                .tagged()
                .find_match(ending)
                .map(TaggedEntry::lemma)
                .unwrap_or(ending);

            Some((beginning.to_owned(), ending.to_owned()))
        })
}

fn lemmatize_ending(neighbour: &str, ending: String, tagged: &TaggedReference) -> String {
    match tagged.find_match(&format!("{}{}", neighbour, ending)) {
        Some(entry) => entry.lemma_tail(char_len(neighbour)).to_owned(),
        None => ending,
    }
}

/// Split a hyphenated word.
///
/// The word is split at the last hyphen if it is the only hyphen or if
/// it is followed by an uppercase letter (*Ost-West-Achse*), otherwise at
/// the first hyphen if that is followed by an uppercase letter.
fn split_hyphenated(word: &str, tagged: &TaggedReference) -> Option<(String, String)> {
    let reference_split = tagged
        .iter()
        .filter(|entry| entry.matches_dehyphenated(word))
        .find_map(|entry| {
            let (beginning, _) = entry.segmented().split_once(SEGMENT_MARKER)?;
            Some((
                beginning.to_owned(),
                entry.lemma_tail(char_len(beginning)).to_owned(),
            ))
        });
    if reference_split.is_some() {
        return reference_split;
    }

    let hyphens = word.matches(HYPHEN).count();
    let first = word.find(HYPHEN)?;
    let last = word.rfind(HYPHEN)?;

    let followed_by_uppercase = |pos: usize| {
        word[pos + HYPHEN.len_utf8()..]
            .chars()
            .next()
            .map(char::is_uppercase)
            .unwrap_or(false)
    };

    let border = if last + HYPHEN.len_utf8() == word.len() {
        return None;
    } else if hyphens == 1 || followed_by_uppercase(last) {
        last
    } else if followed_by_uppercase(first) {
        first
    } else {
        return None;
    };

    let ending = &word[border + HYPHEN.len_utf8()..];
    let ending = tagged
        .find_match(ending)
        .map(TaggedEntry::lemma)
        .unwrap_or(ending);

    Some((word[..border].to_owned(), ending.to_owned()))
}

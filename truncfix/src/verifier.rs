//! Segmentation of the companion lemma after a truncation is resolved.
//!
//! In *Wald- und Wiesenwege*, resolving *Wald-* to *Wald#Wege* also tells
//! us that *Wiesenwege* is segmented as *Wiesen#Wege*.

use crate::constants::{HYPHEN, PARTICIPLE_VERB_TAG, SEGMENT_MARKER, ZU_INFINITIVE_VERB_TAG};
use crate::resolution::Resolution;
use crate::suffix::{split_geographic, split_valley_lemma};
use crate::tables::Tables;
use crate::token::TokenSequence;
use crate::util::{
    char_len, rfind_chars, rfind_ignore_case, skip_chars, strip_all, strip_decoration,
    strip_segmentation, take_chars,
};

/// The number of head characters that is searched in the companion.
const ANCHOR_LEN: usize = 3;

/// Segment the lemma of the companion of a truncation.
///
/// The companion is split before a geographic head, or otherwise before
/// the last occurrence of the first three characters of the head that
/// the truncation borrowed. Companion lemmas that are already segmented
/// are left alone.
pub fn verify(resolution: &Resolution, sentence: &mut dyn TokenSequence, companion: usize) {
    let token = sentence.token(companion);
    let lemma = token.lemma();
    let form = token.form().trim();

    if lemma.contains(SEGMENT_MARKER) {
        return;
    }

    let split = split_valley_lemma(lemma)
        .or_else(|| split_geographic(form))
        .map(|(beginning, ending)| (beginning.to_owned(), ending.to_owned()))
        .or_else(|| {
            let compound = resolution.compound()?;
            let ending = strip_segmentation(compound.suffix());
            let border = find_head(form, &ending)?;
            Some((take_chars(form, border).to_owned(), ending))
        });

    let (beginning, ending) = match split {
        Some(split) => split,
        None => return,
    };

    let mut beginning = beginning.trim_matches(HYPHEN);
    let ending = ending.trim_matches(HYPHEN);

    let xpos = token.xpos();
    if xpos == PARTICIPLE_VERB_TAG {
        beginning = beginning.strip_suffix("ge").unwrap_or(beginning);
    } else if xpos == ZU_INFINITIVE_VERB_TAG {
        beginning = beginning.strip_suffix("zu").unwrap_or(beginning);
    }

    let beginning = strip_decoration(beginning);
    if beginning.is_empty() || ending.is_empty() {
        return;
    }

    let lemma = format!("{}{}{}", beginning, SEGMENT_MARKER, ending);
    log::trace!("Segmented companion lemma: {}", lemma);
    sentence.token_mut(companion).set_lemma(lemma);
}

/// Find the start of a head in a word.
///
/// The word is searched for the first characters of the head, ignoring
/// case. If they do not occur, the first *a*, *o*, or *u* is replaced by
/// its umlaut (*Haus* in *Gasthäuser*).
fn find_head(word: &str, head: &str) -> Option<usize> {
    let anchor = take_chars(head, ANCHOR_LEN);
    if anchor.is_empty() {
        return None;
    }

    rfind_ignore_case(word, anchor).or_else(|| {
        [('a', 'ä'), ('o', 'ö'), ('u', 'ü')]
            .iter()
            .filter(|(vowel, _)| anchor.contains(*vowel))
            .find_map(|&(vowel, umlaut)| {
                rfind_chars(word, &anchor.replacen(vowel, &umlaut.to_string(), 1))
            })
    })
}

/// Segment the lemma of the companion of a reversed truncation.
///
/// In *Bergsteiger und -wanderer*, *-wanderer* resolved to
/// *Berg#wanderer* tells us that *Bergsteiger* is *Berg#steiger*. The
/// remainder of the companion is lemmatized with the tagged reference or
/// the compound table.
pub fn verify_reversed(
    resolution: &Resolution,
    sentence: &mut dyn TokenSequence,
    companion: usize,
    tables: &Tables,
) {
    let compound = match resolution.compound() {
        Some(compound) => compound,
        None => return,
    };

    let token = sentence.token(companion);
    if token.lemma().contains(SEGMENT_MARKER) {
        return;
    }

    let form = token.form().trim();
    let beginning = strip_decoration(compound.prefix());
    let beginning_len = char_len(&beginning);
    let remainder = skip_chars(form, beginning_len);

    let ending = tables
        .tagged()
        .find_surface(form)
        .map(|entry| entry.lemma_tail(beginning_len))
        .filter(|ending| char_len(ending) > 1)
        .map(str::to_lowercase)
        .or_else(|| {
            tables
                .compounds()
                .get_ignore_case(remainder)
                .map(|segmented| strip_all(segmented).to_lowercase())
        })
        .or_else(|| {
            tables
                .tagged()
                .find_surface(remainder)
                .map(|entry| entry.lemma())
                .filter(|lemma| char_len(lemma) > 1)
                .map(str::to_lowercase)
        })
        .unwrap_or_else(|| remainder.to_owned());

    let beginning = beginning.strip_suffix(HYPHEN).unwrap_or(beginning.as_str());
    let ending = ending.strip_prefix(HYPHEN).unwrap_or(ending.as_str());
    if beginning.is_empty() || ending.is_empty() {
        return;
    }

    let lemma = format!("{}{}{}", beginning, SEGMENT_MARKER, ending);
    log::trace!("Segmented companion lemma: {}", lemma);
    sentence.token_mut(companion).set_lemma(lemma);
}

//! Detection of elliptical coordination patterns.
//!
//! A truncation (TRUNC) is the first part of a compound whose second part
//! is elided, as *Wald-* in *Wald- und Wiesenwege*, or conversely the
//! second part of a compound whose first part is elided, as *-wanderer* in
//! *Bergsteiger und -wanderer*. The patterns below are tag sequences in
//! which such truncations occur. They are tested in order and at most one
//! pattern fires per position.

use std::fmt;

use crate::constants::*;
use crate::token::TokenSequence;
use crate::util::char_len;

/// Truncation patterns, in order of priority.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Pattern {
    /// `TRUNC $, TRUNC $, TRUNC KON NN|NE|ADJA`
    TripleCoordination,

    /// `TRUNC $, TRUNC KON NN|NE|ADJA`
    DoubleCoordination,

    /// `TRUNC KON -WORD`, e.g. *Ein- und -ausgang*
    HyphenatedConjunct,

    /// `TRUNC KON APPR ART NN|NE`
    PrepositionalPhrase,

    /// `TRUNC KON ADJA|ADJD|ADV|CARD|VVFIN|VVPP|VVIZU|VVINF|APPR`, not
    /// followed by `NN|NE`
    NonNominalConjunct,

    /// `TRUNC KON ADJA|CARD|ADV NN|NE`
    ModifiedNoun,

    /// `TRUNC KON ART|APPR|APPRART NN|NE`
    DeterminedNoun,

    /// `TRUNC KON ART|CARD|ADV|APPR|APPRART ADJA NN|NE`
    DeterminedModifiedNoun,

    /// `TRUNC KON NN|NE`
    Noun,

    /// `TRUNC APPRART NN|NE|ADJA`
    FusedPreposition,

    /// `WORD KON -WORD`, detected at the second conjunct.
    ReversedTruncation,
}

impl Pattern {
    /// The number of the pattern in priority order, starting at 1.
    pub fn number(self) -> usize {
        use Pattern::*;
        match self {
            TripleCoordination => 1,
            DoubleCoordination => 2,
            HyphenatedConjunct => 3,
            PrepositionalPhrase => 4,
            NonNominalConjunct => 5,
            ModifiedNoun => 6,
            DeterminedNoun => 7,
            DeterminedModifiedNoun => 8,
            Noun => 9,
            FusedPreposition => 10,
            ReversedTruncation => 11,
        }
    }

    /// Detect the pattern that occurs at position `idx`.
    pub fn detect(sentence: &dyn TokenSequence, idx: usize) -> Option<Pattern> {
        let window = Window { sentence, idx };

        if window.is_trunc(0) {
            if let Some(pattern) = window.detect_coordination() {
                return Some(pattern);
            }

            if window.tag_is(1, CONJUNCTION_TAG) {
                return window.detect_conjunct();
            }

            if window.tag_is(1, FUSED_PREPOSITION_TAG) && window.tag_in(2, &COORDINATION_HEAD_TAGS)
            {
                return Some(Pattern::FusedPreposition);
            }
        }

        if window.is_reversed_trunc() {
            return Some(Pattern::ReversedTruncation);
        }

        None
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pattern_{}", self.number())
    }
}

/// Bounds-checked view of the tokens around a position.
struct Window<'a> {
    sentence: &'a dyn TokenSequence,
    idx: usize,
}

impl<'a> Window<'a> {
    fn position(&self, offset: isize) -> Option<usize> {
        let pos = self.idx as isize + offset;
        if pos < 0 || pos as usize >= self.sentence.len() {
            None
        } else {
            Some(pos as usize)
        }
    }

    fn form(&self, offset: isize) -> Option<&'a str> {
        let sentence = self.sentence;
        self.position(offset).map(|pos| sentence.token(pos).form())
    }

    fn tag(&self, offset: isize) -> Option<&'a str> {
        let sentence = self.sentence;
        self.position(offset).map(|pos| sentence.token(pos).xpos())
    }

    fn tag_is(&self, offset: isize, tag: &str) -> bool {
        self.tag(offset) == Some(tag)
    }

    fn tag_in(&self, offset: isize, tags: &std::collections::HashSet<&'static str>) -> bool {
        self.tag(offset).map(|tag| tags.contains(tag)).unwrap_or(false)
    }

    fn is_nominal(&self, offset: isize) -> bool {
        self.tag(offset).map(is_nominal).unwrap_or(false)
    }

    fn is_trunc(&self, offset: isize) -> bool {
        self.tag_is(offset, TRUNCATED_TAG)
            && self
                .form(offset)
                .map(|form| form.ends_with(HYPHEN))
                .unwrap_or(false)
    }

    fn starts_with_hyphen(&self, offset: isize) -> bool {
        self.form(offset)
            .map(|form| form.starts_with(HYPHEN))
            .unwrap_or(false)
    }

    fn is_coordination_head(&self, offset: isize) -> bool {
        self.tag_in(offset, &COORDINATION_HEAD_TAGS)
            && self.form(offset).is_some()
            && !self.starts_with_hyphen(offset)
    }

    fn detect_coordination(&self) -> Option<Pattern> {
        if self.tag_is(1, COMMA_TAG)
            && self.is_trunc(2)
            && self.tag_is(3, COMMA_TAG)
            && self.is_trunc(4)
            && self.tag_is(5, CONJUNCTION_TAG)
            && self.is_coordination_head(6)
        {
            return Some(Pattern::TripleCoordination);
        }

        if self.tag_is(1, COMMA_TAG)
            && self.is_trunc(2)
            && self.tag_is(3, CONJUNCTION_TAG)
            && self.is_coordination_head(4)
        {
            return Some(Pattern::DoubleCoordination);
        }

        None
    }

    /// Patterns that start with `TRUNC KON`. No other pattern is tried
    /// when none of these matches.
    fn detect_conjunct(&self) -> Option<Pattern> {
        if self.starts_with_hyphen(2) {
            Some(Pattern::HyphenatedConjunct)
        } else if self.tag_is(2, PREPOSITION_TAG)
            && self.tag_is(3, ARTICLE_TAG)
            && self.is_nominal(4)
        {
            Some(Pattern::PrepositionalPhrase)
        } else if self.tag_in(2, &NON_NOMINAL_CONJUNCT_TAGS) && !self.is_nominal(3) {
            Some(Pattern::NonNominalConjunct)
        } else if self.is_nominal(3) && self.tag_in(2, &NOUN_MODIFIER_TAGS) {
            Some(Pattern::ModifiedNoun)
        } else if self.tag_in(2, &DETERMINER_TAGS) && self.is_nominal(3) {
            Some(Pattern::DeterminedNoun)
        } else if self.tag_in(2, &ADJECTIVE_PHRASE_START_TAGS)
            && self.tag_is(3, ATTRIBUTIVE_ADJECTIVE_TAG)
            && self.is_nominal(4)
        {
            Some(Pattern::DeterminedModifiedNoun)
        } else if self.is_nominal(2) {
            Some(Pattern::Noun)
        } else {
            None
        }
    }

    fn is_reversed_trunc(&self) -> bool {
        self.starts_with_hyphen(0)
            && self.form(0).map(char_len).unwrap_or(0) > 3
            && self.tag_is(-1, CONJUNCTION_TAG)
            && self.tag(-2).is_some()
            && !self.tag_is(-2, TRUNCATED_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::Pattern;
    use crate::test_helpers::sentence;

    fn detect(tokens: &str, idx: usize) -> Option<Pattern> {
        Pattern::detect(&sentence(tokens), idx)
    }

    #[test]
    fn detects_coordinations() {
        assert_eq!(
            detect(
                "Wald-/TRUNC ,/$, Feld-/TRUNC ,/$, Wiesen-/TRUNC und/KON Wege/NN",
                0
            ),
            Some(Pattern::TripleCoordination)
        );
        assert_eq!(
            detect("Wald-/TRUNC ,/$, Feld-/TRUNC und/KON Wiesenwege/NN", 0),
            Some(Pattern::DoubleCoordination)
        );
        // The last truncation of a coordination starts a shorter pattern.
        assert_eq!(
            detect("Wald-/TRUNC ,/$, Feld-/TRUNC und/KON Wiesenwege/NN", 2),
            Some(Pattern::Noun)
        );
    }

    #[test]
    fn detects_conjunct_patterns() {
        assert_eq!(
            detect("Ein-/TRUNC und/KON -ausgang/NN", 0),
            Some(Pattern::HyphenatedConjunct)
        );
        assert_eq!(
            detect("Hin-/TRUNC und/KON zu/APPR dem/ART Ziel/NN", 0),
            Some(Pattern::PrepositionalPhrase)
        );
        assert_eq!(
            detect("ab-/TRUNC und/KON zugeschlossen/VVPP ./$.", 0),
            Some(Pattern::NonNominalConjunct)
        );
        assert_eq!(
            detect("ab-/TRUNC und/KON zugeschlossen/VVPP", 0),
            Some(Pattern::NonNominalConjunct)
        );
        assert_eq!(
            detect("Stadt-/TRUNC und/KON kantonale/ADJA Behörden/NN", 0),
            Some(Pattern::ModifiedNoun)
        );
        assert_eq!(
            detect("Sommer-/TRUNC oder/KON die/ART Winterreifen/NN", 0),
            Some(Pattern::DeterminedNoun)
        );
        assert_eq!(
            detect("Sommer-/TRUNC oder/KON die/ART neuen/ADJA Winterreifen/NN", 0),
            Some(Pattern::DeterminedModifiedNoun)
        );
        assert_eq!(
            detect("Wald-/TRUNC und/KON Wiesenwege/NN", 0),
            Some(Pattern::Noun)
        );
        assert_eq!(detect("Wald-/TRUNC und/KON ./$.", 0), None);
    }

    #[test]
    fn adverb_before_adjective_is_non_nominal() {
        assert_eq!(
            detect("Sommer-/TRUNC und/KON sehr/ADV teure/ADJA Winterreifen/NN", 0),
            Some(Pattern::NonNominalConjunct)
        );
    }

    #[test]
    fn detects_fused_preposition() {
        assert_eq!(
            detect("Hallen-/TRUNC zum/APPRART Freibad/NN", 0),
            Some(Pattern::FusedPreposition)
        );
    }

    #[test]
    fn detects_reversed_truncation() {
        assert_eq!(
            detect("Bergsteiger/NN und/KON -wanderer/TRUNC", 2),
            Some(Pattern::ReversedTruncation)
        );
        assert_eq!(detect("und/KON -wanderer/TRUNC", 1), None);
        assert_eq!(detect("Berg/NN und/KON -ab/TRUNC", 2), None);
        // Handled as a hyphenated conjunct at the first truncation.
        assert_eq!(detect("Ein-/TRUNC und/KON -ausgang/NN", 2), None);
    }

    #[test]
    fn requires_hyphen_on_truncation() {
        assert_eq!(detect("Wald/TRUNC und/KON Wiesenwege/NN", 0), None);
        assert_eq!(detect("Wald-/NN und/KON Wiesenwege/NN", 0), None);
    }

    #[test]
    fn pattern_names() {
        assert_eq!(Pattern::Noun.to_string(), "pattern_9");
        assert_eq!(Pattern::ReversedTruncation.number(), 11);
    }
}

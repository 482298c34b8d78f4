use std::collections::HashSet;

use lazy_static::lazy_static;
use maplit::hashset;

pub(crate) static TRUNCATED_TAG: &str = "TRUNC";
pub(crate) static CONJUNCTION_TAG: &str = "KON";
pub(crate) static COMMA_TAG: &str = "$,";

pub(crate) static NOUN_TAG: &str = "NN";
pub(crate) static NAMED_ENTITY_TAG: &str = "NE";
pub(crate) static ATTRIBUTIVE_ADJECTIVE_TAG: &str = "ADJA";
pub(crate) static ADVERBIAL_ADJECTIVE_TAG: &str = "ADJD";
pub(crate) static ADVERB_TAG: &str = "ADV";
pub(crate) static CARDINAL_TAG: &str = "CARD";
pub(crate) static ARTICLE_TAG: &str = "ART";
pub(crate) static PREPOSITION_TAG: &str = "APPR";
pub(crate) static FUSED_PREPOSITION_TAG: &str = "APPRART";
pub(crate) static FINITE_VERB_TAG: &str = "VVFIN";
pub(crate) static INFINITIVE_VERB_TAG: &str = "VVINF";
pub(crate) static PARTICIPLE_VERB_TAG: &str = "VVPP";
pub(crate) static ZU_INFINITIVE_VERB_TAG: &str = "VVIZU";

/// Separator between the parts of a resolved compound lemma.
pub(crate) static SEGMENT_MARKER: char = '#';

/// Separator between the truncated stem and the borrowed segment.
pub(crate) static MERGE_MARKER: char = '+';

/// Hyphen of a truncation (*Wald-*, *-wege*).
pub(crate) static HYPHEN: char = '-';

/// Characters that decorate Gertwol analyses, but are not part of a lemma.
pub(crate) static DECORATION_CHARS: &[char] = &['\\', ',', ' ', '~', '|'];

lazy_static! {
    /// Tags of a compound that can complete a coordination of truncations.
    pub(crate) static ref COORDINATION_HEAD_TAGS: HashSet<&'static str> = hashset! {
        NOUN_TAG,
        NAMED_ENTITY_TAG,
        ATTRIBUTIVE_ADJECTIVE_TAG,
    };

    /// Tags of a second conjunct that is not followed by a noun.
    pub(crate) static ref NON_NOMINAL_CONJUNCT_TAGS: HashSet<&'static str> = hashset! {
        ATTRIBUTIVE_ADJECTIVE_TAG,
        ADVERBIAL_ADJECTIVE_TAG,
        ADVERB_TAG,
        CARDINAL_TAG,
        FINITE_VERB_TAG,
        PARTICIPLE_VERB_TAG,
        ZU_INFINITIVE_VERB_TAG,
        INFINITIVE_VERB_TAG,
        PREPOSITION_TAG,
    };

    pub(crate) static ref NOUN_MODIFIER_TAGS: HashSet<&'static str> = hashset! {
        ATTRIBUTIVE_ADJECTIVE_TAG,
        CARDINAL_TAG,
        ADVERB_TAG,
    };

    pub(crate) static ref DETERMINER_TAGS: HashSet<&'static str> = hashset! {
        ARTICLE_TAG,
        PREPOSITION_TAG,
        FUSED_PREPOSITION_TAG,
    };

    pub(crate) static ref ADJECTIVE_PHRASE_START_TAGS: HashSet<&'static str> = hashset! {
        ARTICLE_TAG,
        CARDINAL_TAG,
        ADVERB_TAG,
        PREPOSITION_TAG,
        FUSED_PREPOSITION_TAG,
    };
}

pub(crate) fn is_nominal<S>(tag: S) -> bool
where
    S: AsRef<str>,
{
    let tag = tag.as_ref();
    tag == NOUN_TAG || tag == NAMED_ENTITY_TAG
}

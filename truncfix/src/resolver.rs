//! Resolution of truncations in sentences.

use crate::analyzer::{analyze, Variant};
use crate::companion::companion_form;
use crate::composer::{compose, compose_reversed, rank, resolve_by_reference, Candidate};
use crate::config::ResolverConfig;
use crate::outcome::Report;
use crate::pattern::Pattern;
use crate::resolution::{Compound, Resolution};
use crate::tables::Tables;
use crate::token::TokenSequence;
use crate::verifier::{verify, verify_reversed};

/// Anchor length used to segment the companion of a modified noun.
const MODIFIED_NOUN_ANCHOR_LEN: usize = 4;

/// Anchor length used to segment other companions.
const ANCHOR_LEN: usize = 3;

/// Truncation resolver.
///
/// The resolver scans a sentence from left to right. At every position,
/// the first matching truncation pattern is resolved and the lemmas of
/// the truncations are replaced by segmented compound lemmas
/// (*Wald-* → *Wald#Wege*). Since the scan advances one token at a time,
/// a truncation can be resolved again by a shorter pattern at a later
/// position.
pub struct Resolver {
    tables: Tables,
    unknown_lemmas: Vec<String>,
}

impl Resolver {
    pub fn new(tables: Tables, config: &ResolverConfig) -> Self {
        Resolver {
            tables,
            unknown_lemmas: config.unknown_lemmas.clone(),
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Resolve the truncations in a sentence.
    ///
    /// Resolution never fails. Truncations that cannot be resolved keep
    /// their lemmas and are counted in the returned report.
    pub fn resolve(&self, sentence: &mut dyn TokenSequence) -> Report {
        let mut pass = Pass {
            resolver: self,
            sentence,
            report: Report::default(),
        };

        for idx in 0..pass.sentence.len() {
            if let Some(pattern) = Pattern::detect(&*pass.sentence, idx) {
                log::trace!("Found {} at position {}", pattern, idx);
                let substitutions = pass.resolve_pattern(pattern, idx);
                for (trunc, resolution) in substitutions {
                    pass.substitute(trunc, resolution);
                }
            }
        }

        pass.report
    }
}

/// State of a single resolution pass over a sentence.
struct Pass<'a> {
    resolver: &'a Resolver,
    sentence: &'a mut dyn TokenSequence,
    report: Report,
}

impl<'a> Pass<'a> {
    /// Resolve the truncations of a pattern at `idx`.
    ///
    /// Returns the positions of the truncations with their resolutions.
    fn resolve_pattern(&mut self, pattern: Pattern, idx: usize) -> Vec<(usize, Resolution)> {
        use Pattern::*;

        match pattern {
            TripleCoordination => self.coordination(pattern, &[idx, idx + 2, idx + 4], idx + 6),
            DoubleCoordination => self.coordination(pattern, &[idx, idx + 2], idx + 4),
            HyphenatedConjunct => self.hyphenated_conjunct(pattern, idx),
            PrepositionalPhrase => self.prepositional_phrase(pattern, idx),
            NonNominalConjunct => self.single(pattern, idx, idx + 2, Variant::Adjective),
            ModifiedNoun => self.competing(
                pattern,
                idx,
                Some(idx + 3),
                &[(idx + 2, Variant::Adjective), (idx + 3, Variant::Noun)],
                MODIFIED_NOUN_ANCHOR_LEN,
            ),
            DeterminedNoun => self.single(pattern, idx, idx + 3, Variant::Noun),
            DeterminedModifiedNoun => self.competing(
                pattern,
                idx,
                Some(idx + 4),
                &[(idx + 4, Variant::Noun), (idx + 3, Variant::Adjective)],
                ANCHOR_LEN,
            ),
            Noun | FusedPreposition => self.single(pattern, idx, idx + 2, Variant::Noun),
            ReversedTruncation => self.reversed(pattern, idx, idx - 2),
        }
    }

    fn form(&self, idx: usize) -> String {
        self.sentence.token(idx).form().trim().to_owned()
    }

    fn lemma(&self, idx: usize) -> String {
        self.sentence.token(idx).lemma().to_owned()
    }

    fn companion_form(&mut self, companion: usize) -> String {
        companion_form(
            self.sentence,
            companion,
            &self.resolver.tables,
            &self.resolver.unknown_lemmas,
        )
    }

    /// Resolve a truncation against the analysable form of a companion.
    fn compose(
        &mut self,
        pattern: Pattern,
        trunc: usize,
        companion: usize,
        companion_form: &str,
        variant: Variant,
    ) -> Resolution {
        let resolver = self.resolver;
        let tables = &resolver.tables;
        let trunc_form = self.form(trunc);
        let segments = analyze(
            companion_form,
            &trunc_form,
            variant,
            tables.frequencies(),
            self.report.outcomes_mut(),
        );
        compose(
            &trunc_form,
            &segments,
            &self.lemma(companion),
            pattern,
            tables.frequencies(),
            self.report.outcomes_mut(),
        )
    }

    fn compose_reversed(
        &mut self,
        pattern: Pattern,
        trunc: usize,
        companion: usize,
        companion_form: &str,
    ) -> Resolution {
        let resolver = self.resolver;
        let tables = &resolver.tables;
        let trunc_form = self.form(trunc);
        let segments = analyze(
            companion_form,
            &trunc_form,
            Variant::Reversed,
            tables.frequencies(),
            self.report.outcomes_mut(),
        );
        compose_reversed(
            &trunc_form,
            &segments,
            &self.lemma(companion),
            pattern,
            tables,
            self.report.outcomes_mut(),
        )
    }

    /// Coordinated truncations that share the compound at `head`:
    /// *Wald-, Feld- und Wiesenwege*.
    fn coordination(
        &mut self,
        pattern: Pattern,
        truncs: &[usize],
        head: usize,
    ) -> Vec<(usize, Resolution)> {
        let head_form = self.companion_form(head);
        truncs
            .iter()
            .map(|&trunc| {
                let resolution = self.compose(pattern, trunc, head, &head_form, Variant::Noun);
                (trunc, resolution)
            })
            .collect()
    }

    /// A truncation that shares a compound with a single companion.
    fn single(
        &mut self,
        pattern: Pattern,
        trunc: usize,
        companion: usize,
        variant: Variant,
    ) -> Vec<(usize, Resolution)> {
        let form = self.companion_form(companion);
        let resolution = self.compose(pattern, trunc, companion, &form, variant);
        verify(&resolution, self.sentence, companion);
        vec![(trunc, resolution)]
    }

    /// *Ein- und -ausgänge*: both conjuncts are truncated and borrow from
    /// each other.
    fn hyphenated_conjunct(&mut self, pattern: Pattern, trunc: usize) -> Vec<(usize, Resolution)> {
        let reversed_trunc = trunc + 2;

        let second_form = self.companion_form(reversed_trunc);
        let first_form = self.companion_form(trunc);

        // The second conjunct is itself truncated and gets its lemma only
        // through its own resolution.
        let resolution = self.compose(pattern, trunc, reversed_trunc, &second_form, Variant::Noun);
        let reversed_resolution =
            self.compose_reversed(pattern, reversed_trunc, trunc, &first_form);

        vec![(trunc, resolution), (reversed_trunc, reversed_resolution)]
    }

    /// *Hin- und zu dem Ziel*: the truncation borrows from the noun or
    /// from the preposition.
    fn prepositional_phrase(&mut self, pattern: Pattern, trunc: usize) -> Vec<(usize, Resolution)> {
        self.competing(
            pattern,
            trunc,
            None,
            &[(trunc + 4, Variant::Noun), (trunc + 2, Variant::Adjective)],
            ANCHOR_LEN,
        )
    }

    /// A truncation with competing companions.
    ///
    /// If `merge_with` is given, the truncation is also combined with the
    /// full form of that token (*Stadt-* + *Behörden*). The candidates are
    /// ranked by frequency. Undecidable truncations are resolved with the
    /// tagged reference.
    fn competing(
        &mut self,
        pattern: Pattern,
        trunc: usize,
        merge_with: Option<usize>,
        companions: &[(usize, Variant)],
        anchor_len: usize,
    ) -> Vec<(usize, Resolution)> {
        let merged = merge_with.and_then(|idx| Compound::new(self.form(trunc), self.form(idx)));

        let mut candidates = Vec::with_capacity(companions.len());
        for &(companion, variant) in companions {
            let form = self.companion_form(companion);
            let resolution = self.compose(pattern, trunc, companion, &form, variant);
            candidates.extend(Candidate::from_resolution(resolution, companion));
        }

        let resolver = self.resolver;
        let tables = &resolver.tables;
        let compounds = merged
            .into_iter()
            .chain(candidates.iter().map(|candidate| candidate.compound.clone()));
        let resolution = match rank(
            compounds,
            pattern,
            tables.frequencies(),
            self.report.outcomes_mut(),
        ) {
            Resolution::Undecidable => resolve_by_reference(
                self.sentence,
                trunc,
                &candidates,
                tables.tagged(),
                anchor_len,
            ),
            resolution => resolution,
        };

        vec![(trunc, resolution)]
    }

    /// *Bergsteiger und -wanderer*: the truncation borrows the head of the
    /// preceding conjunct.
    fn reversed(
        &mut self,
        pattern: Pattern,
        trunc: usize,
        companion: usize,
    ) -> Vec<(usize, Resolution)> {
        let form = self.companion_form(companion);
        let resolution = self.compose_reversed(pattern, trunc, companion, &form);
        verify_reversed(&resolution, self.sentence, companion, &self.resolver.tables);
        vec![(trunc, resolution)]
    }

    fn substitute(&mut self, trunc: usize, resolution: Resolution) {
        if let Resolution::Resolved(compound) = resolution {
            let lemma = compound.lemma();
            log::debug!(
                "Resolved truncation '{}' to '{}'",
                self.sentence.token(trunc).form(),
                lemma
            );
            self.sentence.token_mut(trunc).set_lemma(lemma);
            self.report.count_change();
        }
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;

    use super::Resolver;
    use crate::config::ResolverConfig;
    use crate::outcome::Category;
    use crate::pattern::Pattern;
    use crate::tables::Tables;
    use crate::test_helpers::{lemmas, run_test_cases, sentence, tables};

    fn resolver(tables: Tables) -> Resolver {
        Resolver::new(tables, &ResolverConfig::default())
    }

    #[test]
    fn resolves_noun_coordination() {
        let resolver = resolver(tables(
            hashmap! { "Wiesenwege" => "Wiese#n#Wege" },
            hashmap! { "Waldwege" => 5, "Wiesenwege" => 9 },
            &[],
        ));
        let mut tokens = sentence("Wald-/TRUNC und/KON Wiesenwege/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Wald#Wege", "unk", "Wiesen#Wege"]);
        assert_eq!(report.changed(), 1);
        assert!(report.outcomes().is_empty());
    }

    #[test]
    fn unattested_compounds_are_undecidable() {
        let resolver = resolver(tables(
            hashmap! { "Wiesenwege" => "Wiese#n#Wege" },
            hashmap! {},
            &[],
        ));
        let mut tokens = sentence("Wald-/TRUNC und/KON Wiesenwege/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens)[0], "unk");
        assert_eq!(report.changed(), 0);
        assert_eq!(
            report.outcomes().count(Category::Undecidable(Pattern::Noun)),
            1
        );
    }

    #[test]
    fn resolves_unknown_place_name() {
        let resolver = resolver(tables(hashmap! {}, hashmap! {}, &[]));
        let mut tokens = sentence("Nord-/TRUNC und/KON Südtal/NN");
        resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Nord#tal", "unk", "Süd#tal"]);
    }

    #[test]
    fn resolves_reversed_truncation() {
        let resolver = resolver(tables(hashmap! {}, hashmap! { "Wiesenwege" => 9 }, &[]));
        let mut tokens = sentence("Wiesen/NN und/KON -wege/TRUNC");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Wiesen", "unk", "Wiesen#wege"]);
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn resolves_triple_coordination() {
        let resolver = resolver(tables(
            hashmap! { "Wiesenwege" => "Wiese#n#Wege" },
            hashmap! { "Waldwege" => 5, "Feldwege" => 2, "Ackerwege" => 1 },
            &[],
        ));
        let mut tokens =
            sentence("Wald-/TRUNC ,/$, Feld-/TRUNC ,/$, Acker-/TRUNC und/KON Wiesenwege/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(
            lemmas(&tokens),
            [
                "Wald#Wege",
                "unk",
                "Feld#Wege",
                "unk",
                "Acker#Wege",
                "unk",
                "Wiesen#Wege"
            ]
        );
        // Later truncations are resolved again by shorter patterns.
        assert_eq!(report.changed(), 6);
    }

    #[test]
    fn resolves_hyphenated_conjuncts() {
        let resolver = resolver(tables(
            hashmap! {},
            hashmap! { "Eingang" => 5, "Einausgang" => 2 },
            &[],
        ));
        let mut tokens = sentence("Ein-/TRUNC und/KON -ausgang/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Ein#gang", "unk", "Ein#ausgang"]);
        assert_eq!(report.changed(), 2);
    }

    #[test]
    fn unresolved_hyphenated_conjunct_keeps_lemma() {
        let resolver = resolver(tables(hashmap! {}, hashmap! { "Eingang" => 5 }, &[]));
        let mut tokens = sentence("Ein-/TRUNC und/KON -ausgang/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Ein#gang", "unk", "unk"]);
        assert_eq!(report.changed(), 1);
        assert_eq!(
            report
                .outcomes()
                .count(Category::UnattestedSplit { reversed: true }),
            1
        );
    }

    #[test]
    fn resolves_prepositional_phrase() {
        let resolver = resolver(tables(hashmap! {}, hashmap! { "Hinweg" => 6 }, &[]));
        let mut tokens = sentence("Hin-/TRUNC und/KON zu/APPR/zu dem/ART/der Rückweg/NN/Rückweg");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens)[0], "Hin#weg");
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn strips_verbal_prefixes_of_companion() {
        let resolver = resolver(tables(
            hashmap! {},
            hashmap! { "eingeben" => 4, "einschließen" => 4 },
            &[],
        ));

        let mut participle = sentence("ein-/TRUNC und/KON/und ausgegeben/VVPP");
        resolver.resolve(&mut participle);
        assert_eq!(lemmas(&participle), ["ein#geben", "und", "aus#geben"]);

        let mut infinitive = sentence("ein-/TRUNC und/KON/und auszuschließen/VVIZU");
        resolver.resolve(&mut infinitive);
        assert_eq!(
            lemmas(&infinitive),
            ["ein#schließen", "und", "aus#schließen"]
        );
    }

    #[test]
    fn resolves_fused_preposition() {
        let resolver = resolver(tables(hashmap! {}, hashmap! { "Hallenbad" => 3 }, &[]));
        let mut tokens = sentence("Hallen-/TRUNC zum/APPRART Freibad/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Hallen#bad", "unk", "Frei#bad"]);
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn bare_valley_supplies_head() {
        let resolver = resolver(tables(hashmap! {}, hashmap! {}, &[]));
        let mut tokens = sentence("Berg-/TRUNC und/KON Tal/NN/Tal");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens), ["Berg#Tal", "unk", "Tal"]);
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn tagged_surface_decides_tied_competition() {
        let resolver = resolver(tables(
            hashmap! {},
            hashmap! { "Skiwandergebiete" => 2, "Skigebiet" => 2 },
            &["Ski#gebiet Skigebiete NN Skigebiet"],
        ));
        let mut tokens =
            sentence("Ski-/TRUNC und/KON alpine/ADJA/alpin Wandergebiete/NN/Wandergebiet");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens)[0], "Ski#gebiet");
        assert_eq!(lemmas(&tokens)[3], "Wander#gebiet");
        assert_eq!(report.changed(), 1);
        assert_eq!(
            report
                .outcomes()
                .count(Category::Undecidable(Pattern::ModifiedNoun)),
            1
        );
    }

    #[test]
    fn resolves_coordinated_truncations() {
        let resolver = resolver(tables(
            hashmap! {},
            hashmap! { "Waldwege" => 5, "Feldwege" => 2, "Wiesenwege" => 9 },
            &[],
        ));
        let mut tokens = sentence("Wald-/TRUNC ,/$, Feld-/TRUNC und/KON Wiesenwege/NN");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(
            lemmas(&tokens),
            ["Wald#wege", "unk", "Feld#wege", "unk", "Wiesen#wege"]
        );
        // Feld- is resolved again as a single truncation.
        assert_eq!(report.changed(), 3);
    }

    #[test]
    fn merges_truncation_with_modified_noun() {
        let resolver = resolver(tables(
            hashmap! {},
            hashmap! { "Stadtbehörden" => 4 },
            &[],
        ));
        let mut tokens =
            sentence("Stadt-/TRUNC und/KON kantonale/ADJA/kantonal Behörden/NN/Behörde");
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens)[0], "Stadt#Behörden");
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn tied_competition_falls_back_to_first_candidate() {
        let resolver = resolver(tables(
            hashmap! {},
            hashmap! { "Sommerreifen" => 5, "Sommerwinterreifen" => 5 },
            &[],
        ));
        let mut tokens = sentence(
            "Sommer-/TRUNC oder/KON die/ART neuen/ADJA/neu Winterreifen/NN/Winterreifen",
        );
        let report = resolver.resolve(&mut tokens);

        assert_eq!(lemmas(&tokens)[0], "Sommer#reifen");
        assert_eq!(lemmas(&tokens)[4], "Winter#reifen");
        assert_eq!(report.changed(), 1);
        assert_eq!(
            report
                .outcomes()
                .count(Category::Undecidable(Pattern::DeterminedModifiedNoun)),
            1
        );
    }

    #[test]
    fn sentence_without_truncations_is_unchanged() {
        let resolver = resolver(tables(
            hashmap! { "Wiesenwege" => "Wiese#n#Wege" },
            hashmap! { "Wiesenwege" => 9 },
            &[],
        ));
        let mut tokens = sentence("Die/ART Wiesenwege/NN sind/VAFIN gesperrt/VVPP ./$.");
        let original = tokens.clone();
        let report = resolver.resolve(&mut tokens);

        assert_eq!(tokens, original);
        assert_eq!(report.changed(), 0);
        assert!(report.outcomes().is_empty());
    }

    #[test]
    fn resolution_is_deterministic() {
        let resolver = resolver(tables(
            hashmap! { "Wiesenwege" => "Wiese#n#Wege" },
            hashmap! { "Waldnwege" => 3, "Waldwege" => 3 },
            &[],
        ));

        let mut first = sentence("Wald-/TRUNC und/KON Wiesenwege/NN");
        let mut second = first.clone();
        let first_report = resolver.resolve(&mut first);
        let second_report = resolver.resolve(&mut second);

        assert_eq!(first, second);
        assert_eq!(first_report, second_report);
        assert_eq!(lemmas(&first)[0], "unk");
    }

    #[test]
    fn resolves_test_cases() {
        run_test_cases("testdata/resolve.test");
    }
}

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FromIterator;
use std::path::Path;

use crate::config::{Config, TomlRead};
use crate::resolver::Resolver;
use crate::tables::{CompoundTable, FrequencyTable, TaggedEntry, TaggedReference, Tables};
use crate::token::{TaggedToken, Token};

/// Lemma of tokens that are written without a lemma.
const UNKNOWN_LEMMA: &str = "unk";

/// Construct a sentence from `form/tag` or `form/tag/lemma` tokens.
pub fn sentence(tokens: &str) -> Vec<TaggedToken> {
    tokens
        .split_whitespace()
        .map(|token| {
            let mut parts = token.splitn(3, '/');
            let form = parts.next().unwrap();
            let xpos = parts
                .next()
                .unwrap_or_else(|| panic!("Token without tag: {}", token));
            let lemma = parts.next().unwrap_or(UNKNOWN_LEMMA);
            TaggedToken::new(form, xpos, lemma)
        })
        .collect()
}

pub fn lemmas(sentence: &[TaggedToken]) -> Vec<String> {
    sentence
        .iter()
        .map(|token| token.lemma().to_owned())
        .collect()
}

pub fn frequency_table(frequencies: HashMap<&str, usize>) -> FrequencyTable {
    FrequencyTable::from_iter(frequencies)
}

/// Construct tables. Tagged entries are written as in the tagged
/// reference file.
pub fn tables(
    compounds: HashMap<&str, &str>,
    frequencies: HashMap<&str, usize>,
    tagged: &[&str],
) -> Tables {
    let tagged = tagged
        .iter()
        .map(|line| {
            let fields: Vec<_> = line.split_whitespace().collect();
            TaggedEntry::new(fields[0], fields[1], fields[3]).unwrap()
        })
        .collect::<TaggedReference>();

    Tables::new(
        CompoundTable::from_iter(compounds),
        frequency_table(frequencies),
        tagged,
    )
}

/// Construct a resolver from the test configuration.
pub fn test_resolver() -> Resolver {
    let config_path = "testdata/truncfix.conf";
    let mut config = Config::from_toml_read(File::open(config_path).unwrap()).unwrap();
    config.relativize_paths(config_path).unwrap();

    let tables = Tables::load(&config.tables).unwrap();
    Resolver::new(tables, &config.resolver)
}

/// Run the test cases in a file.
///
/// Every test case is a line with a sentence and the expected lemmas,
/// separated by `=>`. Empty lines and lines starting with `#` are skipped.
pub fn run_test_cases<P>(filename: P)
where
    P: AsRef<Path>,
{
    let resolver = test_resolver();
    let f = File::open(filename).unwrap();

    for line in BufReader::new(f).lines() {
        let line = line.unwrap();
        let line_str = line.trim();

        if line_str.is_empty() || line_str.starts_with('#') {
            continue;
        }

        let (tokens, correct) = line_str
            .split_once("=>")
            .unwrap_or_else(|| panic!("Gold standard lemmas missing: {}", line_str));

        let mut sentence = sentence(tokens);
        resolver.resolve(&mut sentence);

        assert_eq!(
            lemmas(&sentence),
            correct.split_whitespace().collect::<Vec<_>>(),
            "Incorrect lemmas for: {}",
            tokens.trim()
        );
    }
}

//! Lookup tables used to analyze and rank compounds.
//!
//! Three tables are used:
//!
//! * [`CompoundTable`]: compounds and their Gertwol analyses, e.g.
//!   *Sportkletterroute* → *Sport#klett~er#route*.
//! * [`FrequencyTable`]: corpus frequencies of word forms.
//! * [`TaggedReference`]: tagged and lemmatized compounds that serve as
//!   a last-resort segmentation oracle.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FromIterator;

use regex::Regex;

use crate::config::TablesConfig;
use crate::constants::HYPHEN;
use crate::error::TruncFixError;
use crate::util::char_len;

/// Read a table from a buffered reader.
pub trait ReadTable
where
    Self: Sized,
{
    fn read_table<R>(read: R) -> Result<Self, TruncFixError>
    where
        R: BufRead;
}

/// Compound forms and their segmented (Gertwol) analyses.
#[derive(Clone, Debug, Default)]
pub struct CompoundTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    lowercase_index: HashMap<String, usize>,
}

impl CompoundTable {
    /// Insert an analysis, replacing an earlier analysis of the same form.
    pub fn insert(&mut self, form: impl Into<String>, segmented: impl Into<String>) {
        let form = form.into();
        let segmented = segmented.into();

        if let Some(&idx) = self.index.get(&form) {
            self.entries[idx].1 = segmented;
            return;
        }

        let idx = self.entries.len();
        self.lowercase_index
            .entry(form.to_lowercase())
            .or_insert(idx);
        self.index.insert(form.clone(), idx);
        self.entries.push((form, segmented));
    }

    pub fn contains(&self, form: &str) -> bool {
        self.index.contains_key(form)
    }

    /// Get the analysis of a form.
    pub fn get(&self, form: &str) -> Option<&str> {
        self.index
            .get(form)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Get the analysis of a form, ignoring case.
    ///
    /// If several forms only differ in case, the analysis of the form that
    /// was inserted first is returned.
    pub fn get_ignore_case(&self, form: &str) -> Option<&str> {
        self.lowercase_index
            .get(&form.to_lowercase())
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Iterate over `(form, analysis)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(form, segmented)| (form.as_str(), segmented.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, T> FromIterator<(S, T)> for CompoundTable
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
    {
        let mut table = CompoundTable::default();
        for (form, segmented) in iter {
            table.insert(form, segmented);
        }
        table
    }
}

impl ReadTable for CompoundTable {
    fn read_table<R>(read: R) -> Result<Self, TruncFixError>
    where
        R: BufRead,
    {
        let mut table = CompoundTable::default();

        for (line_idx, line) in read.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let (form, segmented) = split_tab_record(&line, line_idx + 1, "compound")?;
            table.insert(form, segmented);
        }

        Ok(table)
    }
}

/// Corpus frequencies of word forms.
///
/// Sparsity is expected, so a form that is not in the table has
/// frequency zero.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    frequencies: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn frequency(&self, form: &str) -> usize {
        self.frequencies.get(form).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, form: impl Into<String>, frequency: usize) {
        self.frequencies.insert(form.into(), frequency);
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl<S> FromIterator<(S, usize)> for FrequencyTable
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
    {
        FrequencyTable {
            frequencies: iter
                .into_iter()
                .map(|(form, freq)| (form.into(), freq))
                .collect(),
        }
    }
}

impl ReadTable for FrequencyTable {
    fn read_table<R>(read: R) -> Result<Self, TruncFixError>
    where
        R: BufRead,
    {
        let mut table = FrequencyTable::default();

        for (line_idx, line) in read.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let (form, count) = split_tab_record(&line, line_idx + 1, "frequency")?;
            let frequency = count
                .parse()
                .map_err(|source| TruncFixError::InvalidFrequency {
                    line: line_idx + 1,
                    value: count.to_owned(),
                    source,
                })?;
            table.insert(form, frequency);
        }

        Ok(table)
    }
}

fn compile_surface(surface: &str) -> Result<Regex, TruncFixError> {
    match Regex::new(surface) {
        Ok(pattern) => Ok(pattern),
        Err(_) => Ok(Regex::new(&regex::escape(surface))?),
    }
}

fn split_tab_record<'a>(
    line: &'a str,
    line_no: usize,
    table: &'static str,
) -> Result<(&'a str, &'a str), TruncFixError> {
    let mut fields = line.split('\t');
    match (fields.next(), fields.next()) {
        (Some(first), Some(second)) => Ok((first.trim(), second.trim())),
        _ => Err(TruncFixError::MalformedRecord {
            table,
            line: line_no,
            record: line.to_owned(),
        }),
    }
}

/// An entry of the tagged reference list.
#[derive(Clone, Debug)]
pub struct TaggedEntry {
    segmented: String,
    surface: String,
    pattern: Regex,
    dehyphenated: Option<Regex>,
    lemma: String,
}

impl TaggedEntry {
    /// Construct an entry.
    ///
    /// The surface form is used as a regular expression. Surface forms that
    /// are not valid regular expressions are matched literally.
    pub fn new(
        segmented: impl Into<String>,
        surface: impl Into<String>,
        lemma: impl Into<String>,
    ) -> Result<Self, TruncFixError> {
        let surface = surface.into();
        let pattern = compile_surface(&surface)?;
        let dehyphenated = if surface.contains(HYPHEN) {
            Some(compile_surface(&surface.replace(HYPHEN, ""))?)
        } else {
            None
        };

        Ok(TaggedEntry {
            segmented: segmented.into(),
            surface,
            pattern,
            dehyphenated,
            lemma: lemma.into(),
        })
    }

    /// The segmented lemma, e.g. *Wald#weg*.
    pub fn segmented(&self) -> &str {
        &self.segmented
    }

    /// The surface form, e.g. *Waldwege*.
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// The unsegmented lemma, e.g. *Waldweg*.
    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// Check whether the entry matches a word.
    ///
    /// An entry matches when its surface pattern is found in the word and
    /// the lengths of the word and the surface differ by less than three
    /// characters.
    pub fn matches(&self, word: &str) -> bool {
        let word_len = char_len(word) as isize;
        let surface_len = char_len(&self.surface) as isize;
        (word_len - surface_len).abs() < 3 && self.pattern.is_match(word)
    }

    /// Check whether the entry matches a word, ignoring hyphens in both.
    pub fn matches_dehyphenated(&self, word: &str) -> bool {
        let word = word.replace(HYPHEN, "");
        let pattern = self.dehyphenated.as_ref().unwrap_or(&self.pattern);
        let surface_len = char_len(&self.surface.replace(HYPHEN, "")) as isize;
        (char_len(&word) as isize - surface_len).abs() < 3 && pattern.is_match(&word)
    }

    /// The lemma without its first `n` characters.
    pub(crate) fn lemma_tail(&self, n: usize) -> &str {
        crate::util::skip_chars(&self.lemma, n)
    }
}

/// Tagged compounds, in the order of the reference list.
#[derive(Clone, Debug, Default)]
pub struct TaggedReference {
    entries: Vec<TaggedEntry>,
}

impl TaggedReference {
    pub fn push(&mut self, entry: TaggedEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaggedEntry> {
        self.entries.iter()
    }

    /// Find the first entry that matches a word.
    pub fn find_match(&self, word: &str) -> Option<&TaggedEntry> {
        self.entries.iter().find(|entry| entry.matches(word))
    }

    /// Find the first entry whose surface form equals a word, ignoring case.
    pub fn find_surface(&self, word: &str) -> Option<&TaggedEntry> {
        let word = word.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.surface.to_lowercase() == word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TaggedEntry> for TaggedReference {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = TaggedEntry>,
    {
        TaggedReference {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ReadTable for TaggedReference {
    fn read_table<R>(read: R) -> Result<Self, TruncFixError>
    where
        R: BufRead,
    {
        let mut reference = TaggedReference::default();

        for (line_idx, line) in read.lines().enumerate() {
            let line = line?;
            let fields: Vec<_> = line.split_whitespace().collect();

            if fields.is_empty() {
                continue;
            }

            if fields.len() < 4 {
                return Err(TruncFixError::MalformedRecord {
                    table: "tagged reference",
                    line: line_idx + 1,
                    record: line.clone(),
                });
            }

            // The third column is a part-of-speech tag, which is not used.
            reference.push(TaggedEntry::new(fields[0], fields[1], fields[3])?);
        }

        Ok(reference)
    }
}

/// The tables that are shared by all resolutions of a run.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    compounds: CompoundTable,
    frequencies: FrequencyTable,
    tagged: TaggedReference,
}

impl Tables {
    pub fn new(
        compounds: CompoundTable,
        frequencies: FrequencyTable,
        tagged: TaggedReference,
    ) -> Self {
        Tables {
            compounds,
            frequencies,
            tagged,
        }
    }

    /// Read the tables from the files in the configuration.
    pub fn load(config: &TablesConfig) -> Result<Self, TruncFixError> {
        let compounds = CompoundTable::read_table(BufReader::new(File::open(&config.compounds)?))?;
        log::info!(
            "Read {} compound analyses from {}",
            compounds.len(),
            config.compounds
        );

        let frequencies =
            FrequencyTable::read_table(BufReader::new(File::open(&config.frequencies)?))?;
        log::info!(
            "Read {} word frequencies from {}",
            frequencies.len(),
            config.frequencies
        );

        let tagged =
            TaggedReference::read_table(BufReader::new(File::open(&config.tagged_reference)?))?;
        log::info!(
            "Read {} tagged compounds from {}",
            tagged.len(),
            config.tagged_reference
        );

        Ok(Tables::new(compounds, frequencies, tagged))
    }

    pub fn compounds(&self) -> &CompoundTable {
        &self.compounds
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tagged(&self) -> &TaggedReference {
        &self.tagged
    }
}

//! Repair of truncated compound lemmas in elliptical coordinations.
//!
//! In German coordinations such as *Wald- und Wiesenwege*, the first
//! conjunct is truncated: *Wald-* stands for *Waldwege*. Lemmatizers
//! typically leave such truncations without a useful lemma. This crate
//! reconstructs segmented lemmas (*Wald#Wege*) for truncations from the
//! compound that completes them.

pub mod analyzer;

mod companion;

pub mod composer;

pub mod config;
pub use config::{Config, ResolverConfig, TablesConfig, TomlRead};

mod constants;

pub mod error;
pub use error::TruncFixError;

pub mod outcome;
pub use outcome::{Category, Outcomes, Report};

pub mod pattern;
pub use pattern::Pattern;

pub mod resolution;
pub use resolution::{Compound, Resolution};

pub mod resolver;
pub use resolver::Resolver;

pub mod suffix;

pub mod tables;
pub use tables::Tables;

pub mod token;
pub use token::{TaggedToken, TokenSequence};

mod util;

pub mod verifier;

#[cfg(test)]
pub(crate) mod test_helpers;

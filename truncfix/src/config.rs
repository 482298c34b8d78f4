use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TruncFixError;

/// Paths of the lookup tables.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    /// Compound forms with their Gertwol analyses (tab-separated).
    pub compounds: String,

    /// Corpus frequencies of word forms (tab-separated).
    pub frequencies: String,

    /// Tagged compound reference list (whitespace-separated).
    pub tagged_reference: String,
}

/// Resolver configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Lemmas that the lemmatizer uses for unknown words.
    #[serde(default = "default_unknown_lemmas")]
    pub unknown_lemmas: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            unknown_lemmas: default_unknown_lemmas(),
        }
    }
}

fn default_unknown_lemmas() -> Vec<String> {
    vec!["unk".to_string(), "<unknown>".to_string(), "_".to_string()]
}

/// Truncation resolver configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Configuration of the lookup tables.
    pub tables: TablesConfig,

    /// Configuration of the resolver.
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl Config {
    /// Make configuration paths relative to the configuration file.
    pub fn relativize_paths<P>(&mut self, config_path: P) -> Result<(), TruncFixError>
    where
        P: AsRef<Path>,
    {
        let config_path = config_path.as_ref();

        self.tables.compounds = relativize_path(config_path, &self.tables.compounds)?;
        self.tables.frequencies = relativize_path(config_path, &self.tables.frequencies)?;
        self.tables.tagged_reference =
            relativize_path(config_path, &self.tables.tagged_reference)?;

        Ok(())
    }
}

pub trait TomlRead
where
    Self: Sized,
{
    fn from_toml_read(read: impl Read) -> Result<Self, TruncFixError>;
}

impl TomlRead for Config {
    fn from_toml_read(mut read: impl Read) -> Result<Self, TruncFixError> {
        let mut data = String::new();
        read.read_to_string(&mut data)?;
        let config: Config = toml::from_str(&data)?;
        Ok(config)
    }
}

fn relativize_path(config_path: &Path, filename: &str) -> Result<String, TruncFixError> {
    if filename.is_empty() {
        return Ok(filename.to_owned());
    }

    let path = Path::new(&filename);

    // Don't touch absolute paths.
    if path.is_absolute() {
        return Ok(filename.to_owned());
    }

    let abs_config_path = config_path.canonicalize()?;
    Ok(abs_config_path
        .parent()
        .ok_or_else(|| {
            TruncFixError::RelativizePathError(format!(
                "Cannot get parent path of the configuration file: {}",
                abs_config_path.to_string_lossy()
            ))
        })?
        .join(path)
        .to_str()
        .ok_or_else(|| {
            TruncFixError::RelativizePathError(format!(
                "Cannot convert parent path to string: {}",
                abs_config_path.to_string_lossy()
            ))
        })?
        .to_owned())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Config, ResolverConfig, TablesConfig, TomlRead};

    #[test]
    fn config() {
        let config =
            Config::from_toml_read(include_bytes!("../testdata/truncfix.conf").as_ref()).unwrap();

        assert_eq!(
            config,
            Config {
                tables: TablesConfig {
                    compounds: "compounds.tsv".to_string(),
                    frequencies: "frequencies.tsv".to_string(),
                    tagged_reference: "tagged.txt".to_string(),
                },
                resolver: ResolverConfig {
                    unknown_lemmas: vec!["unk".to_string(), "<unknown>".to_string()],
                },
            }
        );
    }

    #[test]
    fn resolver_section_is_optional() {
        let config = Config::from_toml_read(
            r#"
[tables]
compounds = "c.tsv"
frequencies = "f.tsv"
tagged_reference = "t.txt"
"#
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(config.resolver, ResolverConfig::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_toml_read(
            r#"
[tables]
compounds = "c.tsv"
frequencies = "f.tsv"
tagged_reference = "t.txt"
gertwol = "g.tsv"
"#
            .as_bytes(),
        )
        .is_err());
    }

    #[test]
    fn relativizes_table_paths() {
        let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/truncfix.conf");
        let mut config =
            Config::from_toml_read(include_bytes!("../testdata/truncfix.conf").as_ref()).unwrap();
        config.relativize_paths(&config_path).unwrap();

        let testdata = config_path.canonicalize().unwrap();
        let testdata = testdata.parent().unwrap();
        assert_eq!(
            Path::new(&config.tables.compounds),
            testdata.join("compounds.tsv")
        );
        assert_eq!(
            Path::new(&config.tables.tagged_reference),
            testdata.join("tagged.txt")
        );
    }
}

use std::fs::File;
use std::io::{BufReader, BufWriter};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use conllu::io::{ReadSentence, Reader, WriteSentence, Writer};
use itertools::Itertools;
use stdinout::{Input, Output};
use truncfix::{Config, Report, Resolver, Tables, TomlRead};

use crate::progress::{ReadProgress, ResolveSpeed};
use crate::traits::TruncFixApp;

const CONFIG: &str = "CONFIG";
const INPUT: &str = "INPUT";
const OUTPUT: &str = "OUTPUT";
const PROGRESS: &str = "PROGRESS";

pub struct ResolveApp {
    config: String,
    input: Option<String>,
    output: Option<String>,
    progress: bool,
}

impl ResolveApp {
    fn process<R, W>(&self, resolver: &Resolver, read: R, mut write: W) -> Result<Report>
    where
        R: ReadSentence,
        W: WriteSentence,
    {
        let mut speed = ResolveSpeed::new();
        let mut report = Report::default();

        for sentence in read.sentences() {
            let mut sentence = sentence.context("Cannot parse sentence")?;

            let sentence_report = resolver.resolve(&mut sentence);
            speed.count_sentence(sentence_report.changed());
            report.merge(&sentence_report);

            write
                .write_sentence(&sentence)
                .context("Cannot write sentence")?;
        }

        Ok(report)
    }
}

impl TruncFixApp for ResolveApp {
    fn app() -> Command {
        Command::new("resolve")
            .arg_required_else_help(true)
            .about("Repair the lemmas of truncations in a CoNLL-U corpus")
            .arg(
                Arg::new(CONFIG)
                    .help("Resolver configuration file")
                    .index(1)
                    .required(true),
            )
            .arg(Arg::new(INPUT).help("Input corpus").index(2))
            .arg(Arg::new(OUTPUT).help("Output corpus").index(3))
            .arg(
                Arg::new(PROGRESS)
                    .long("progress")
                    .action(ArgAction::SetTrue)
                    .requires(INPUT)
                    .help("Show progress while reading the input corpus"),
            )
    }

    fn parse(matches: &ArgMatches) -> Result<Self> {
        let config = matches.get_one::<String>(CONFIG).unwrap().into();
        let input = matches.get_one::<String>(INPUT).map(ToOwned::to_owned);
        let output = matches.get_one::<String>(OUTPUT).map(ToOwned::to_owned);
        let progress = matches.get_flag(PROGRESS);

        Ok(ResolveApp {
            config,
            input,
            output,
            progress,
        })
    }

    fn run(&self) -> Result<()> {
        let config = load_config(&self.config)?;
        let tables = Tables::load(&config.tables).context("Cannot load lookup tables")?;
        let resolver = Resolver::new(tables, &config.resolver);

        let output = Output::from(self.output.as_ref());
        let writer = Writer::new(BufWriter::new(
            output.write().context("Cannot open output for writing")?,
        ));

        let report = match (&self.input, self.progress) {
            (Some(input), true) => {
                let file = File::open(input)
                    .context(format!("Cannot open input for reading: {}", input))?;
                let read_progress =
                    ReadProgress::new(file).context("Cannot create progress bar")?;
                self.process(&resolver, Reader::new(BufReader::new(read_progress)), writer)?
            }
            _ => {
                let input = Input::from(self.input.as_ref());
                let reader =
                    Reader::new(input.buf_read().context("Cannot open input for reading")?);
                self.process(&resolver, reader, writer)?
            }
        };

        log_report(&report);

        Ok(())
    }
}

fn load_config(config_path: &str) -> Result<Config> {
    let config_file = File::open(config_path)
        .context(format!("Cannot open configuration file '{}'", &config_path))?;
    let mut config = Config::from_toml_read(config_file)
        .context(format!("Cannot parse configuration file: {}", config_path))?;
    config.relativize_paths(config_path).context(format!(
        "Cannot relativize paths in configuration file: {}",
        config_path
    ))?;

    Ok(config)
}

/// Log the unresolved truncations, most frequent category first.
fn log_report(report: &Report) {
    let outcomes = report.outcomes();
    log::info!(
        "Repaired {} lemmas, {} truncations unresolved",
        report.changed(),
        outcomes.total()
    );

    for (category, count) in outcomes
        .iter()
        .sorted_by(|(category1, count1), (category2, count2)| {
            count2
                .cmp(count1)
                .then_with(|| category1.to_string().cmp(&category2.to_string()))
        })
    {
        log::info!("{}: {}", category, count);
    }
}

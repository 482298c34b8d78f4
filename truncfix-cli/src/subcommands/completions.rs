use std::io::stdout;

use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use clap_complete::{generate, Shell};

use crate::traits::TruncFixApp;

const SHELL: &str = "SHELL";

pub struct CompletionsApp {
    shell: Shell,
}

impl TruncFixApp for CompletionsApp {
    fn app() -> Command {
        Command::new("completions")
            .about("Generate completion scripts for your shell")
            .arg_required_else_help(true)
            .arg(
                Arg::new(SHELL)
                    .value_parser(value_parser!(Shell))
                    .required(true),
            )
    }

    fn parse(matches: &ArgMatches) -> Result<Self> {
        let shell = matches
            .get_one::<Shell>(SHELL)
            .copied()
            .expect("Shell is a required argument");

        Ok(CompletionsApp { shell })
    }

    fn run(&self) -> Result<()> {
        let mut cli = crate::cli();
        generate(self.shell, &mut cli, "truncfix", &mut stdout());
        Ok(())
    }
}

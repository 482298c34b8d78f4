use anyhow::Result;
use clap::{crate_version, Command};

pub mod progress;

mod subcommands;

pub mod traits;
use traits::TruncFixApp;

fn cli() -> Command {
    // Known subapplications.
    let apps = vec![
        subcommands::CompletionsApp::app(),
        subcommands::ResolveApp::app(),
    ];

    Command::new("truncfix")
        .arg_required_else_help(true)
        .dont_collapse_args_in_usage(true)
        .about("Repair lemmas of truncated compounds")
        .version(crate_version!())
        .subcommands(apps)
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("completions", matches)) => subcommands::CompletionsApp::parse(matches)?.run(),
        Some(("resolve", matches)) => subcommands::ResolveApp::parse(matches)?.run(),
        _unknown => unreachable!(),
    }
}

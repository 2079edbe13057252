//! Main CLI application

use crate::error::{Result, ZcompError};
use crate::spec::{build_tree, parse_spec_file};
use crate::zsh::generate_script;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Build the clap command for the zcomp binary
fn build_command() -> Command {
    Command::new("zcomp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a zsh completion script from a YAML command spec")
        .arg(
            Arg::new("spec")
                .value_name("SPEC")
                .help("Path to the command spec file")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the script to FILE instead of standard output"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Validate the spec and report warnings without emitting a script")
                .action(ArgAction::SetTrue),
        )
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let matches = build_command().get_matches();
    run_with_matches(&matches)
}

fn run_with_matches(matches: &ArgMatches) -> Result<()> {
    let spec_path = matches
        .get_one::<String>("spec")
        .map(PathBuf::from)
        .ok_or_else(|| {
            ZcompError::Io(io::Error::new(io::ErrorKind::InvalidInput, "missing spec path"))
        })?;

    let spec = parse_spec_file(&spec_path)?;
    let tree = build_tree(&spec);
    let script = generate_script(&tree);

    for warning in &script.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    if matches.get_flag("check") {
        println!(
            "{} spec for '{}' is valid ({} warning(s))",
            "ok:".green().bold(),
            tree.name,
            script.warnings.len()
        );
        return Ok(());
    }

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, script.text)?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(script.text.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}

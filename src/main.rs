//! # lhe2stdhep
//!
//! Convert gzip-compressed LHE files into StdHep files.
//!
//! ```bash
//! # single file, writes run_01.stdhep
//! lhe2stdhep --input run_01.lhe.gz
//!
//! # all files listed in files.txt, reproducible vertex smearing
//! lhe2stdhep --list files.txt --seed 12345 --output-dir stdhep/
//! ```
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use log::{error, info};

use lhe2stdhep::{convert_file, output_path, read_list, Config, ConvertOptions};

/// Convert LHE events to StdHep
#[derive(Parser, Debug)]
#[command(name = "lhe2stdhep")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "list"])))]
struct Cli {
    /// Path to an lhe.gz file to process
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Text file containing a list of lhe.gz files to process, one per line
    #[arg(short, long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Verbosity level (-v to trace every event, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load target geometry and run information from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the vertex smearing, the n-th file uses SEED + n
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for the output files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,
}

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!("Failed to convert {failed} file(s)");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Convert all input files, returning the number of failures
fn run(cli: Cli) -> Result<usize> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let mut options = ConvertOptions::from(config);
    options.verbose = cli.verbose > 0;

    let files = match (cli.input, cli.list) {
        (Some(input), _) => vec![input],
        (None, Some(list)) => read_list(&list)
            .with_context(|| format!("Failed to read file list {}", list.display()))?,
        (None, None) => unreachable!("clap requires an input source"),
    };

    let mut failed = 0;
    for (n, input) in files.iter().enumerate() {
        let output = output_path(input, &cli.output_dir);
        let options = ConvertOptions {
            seed: cli.seed.map(|seed| seed.wrapping_add(n as u64)),
            ..options.clone()
        };
        match convert_file(input, &output, &options) {
            Ok(nevents) => info!("Wrote {nevents} events to {}", output.display()),
            Err(err) => {
                let err = anyhow::Error::new(err)
                    .context(format!("Skipping {}", input.display()));
                error!("{err:#}");
                failed += 1;
            }
        }
    }
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn input_or_list_required() {
        let err = Cli::try_parse_from(["lhe2stdhep"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn input_and_list_conflict() {
        let err = Cli::try_parse_from([
            "lhe2stdhep",
            "--input",
            "a.lhe.gz",
            "--list",
            "files.txt",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from([
            "lhe2stdhep",
            "-i",
            "a.lhe.gz",
            "-vv",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("a.lhe.gz")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }
}

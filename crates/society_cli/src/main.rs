//! Society CLI: incremental class-graph reports for Ruby code bases.
//!
//! Provides `society report` for building and rendering the class graph,
//! `society status` for showing which files the cache already covers, and
//! `society prune` / `society clear` for cache maintenance.

#![warn(missing_docs)]

mod cache;
mod logging;
mod report;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

/// Society: class relationship graphs with an incremental analysis cache.
#[derive(Parser, Debug)]
#[command(name = "society", version, about = "Class graph reports for Ruby code")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a `society.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Cache directory, overriding the configuration file.
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze sources incrementally and render the class graph.
    Report(ReportArgs),
    /// Show which files are cached and which would be re-analyzed.
    Status(PathsArgs),
    /// Remove cache slots superseded by the current content of the given files.
    Prune(PathsArgs),
    /// Delete the cache directory.
    Clear,
}

/// Arguments for the `society report` subcommand.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Source files or directories to analyze.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format (`html` or `json`).
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output path; defaults to the format's own destination.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for subcommands that take a set of source paths.
#[derive(Parser, Debug)]
pub struct PathsArgs {
    /// Source files or directories.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to a configuration file.
    pub config: Option<PathBuf>,
    /// Optional cache directory override.
    pub cache_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
        cache_dir: cli.cache_dir,
    };

    let result = match cli.command {
        Command::Report(ref args) => report::run(args, &global),
        Command::Status(ref args) => cache::status(args, &global),
        Command::Prune(ref args) => cache::prune(args, &global),
        Command::Clear => cache::clear(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_report_default() {
        let cli = Cli::parse_from(["society", "report", "app/models"]);
        match cli.command {
            Command::Report(ref args) => {
                assert_eq!(args.paths, vec![PathBuf::from("app/models")]);
                assert!(args.format.is_none());
                assert!(args.output.is_none());
            }
            _ => panic!("expected Report command"),
        }
    }

    #[test]
    fn parse_report_with_args() {
        let cli = Cli::parse_from([
            "society",
            "report",
            "app/models",
            "lib/user.rb",
            "--format",
            "json",
            "-o",
            "graph.json",
        ]);
        match cli.command {
            Command::Report(ref args) => {
                assert_eq!(args.paths.len(), 2);
                assert_eq!(args.format.as_deref(), Some("json"));
                assert_eq!(args.output, Some(PathBuf::from("graph.json")));
            }
            _ => panic!("expected Report command"),
        }
    }

    #[test]
    fn report_requires_paths() {
        assert!(Cli::try_parse_from(["society", "report"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::parse_from(["society", "status", "a.rb", "b.rb"]);
        match cli.command {
            Command::Status(ref args) => assert_eq!(args.paths.len(), 2),
            _ => panic!("expected Status command"),
        }
    }

    #[test]
    fn parse_prune() {
        let cli = Cli::parse_from(["society", "prune", "app"]);
        assert!(matches!(cli.command, Command::Prune(_)));
    }

    #[test]
    fn parse_clear_with_cache_dir() {
        let cli = Cli::parse_from(["society", "--cache-dir", "/tmp/cache", "clear"]);
        assert!(matches!(cli.command, Command::Clear));
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/cache")));
    }

    #[test]
    fn parse_verbosity_count() {
        let cli = Cli::parse_from(["society", "-vv", "clear"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["society", "status", "a.rb", "--quiet", "--config", "x.toml"]);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["society", "-q", "-v", "clear"]).is_err());
    }
}

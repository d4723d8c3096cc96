//! Command-line surface of `fl`.
//!
//! `fl --root DIR --year YYYY [-v|-q] <score|validate|standings|week>`
//! - All paths are local; season data lives under `<root>/Data/<year>/`.
//! - Verbosity only changes stderr logging, never stdout output.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use fl_io::layout::SeasonPaths;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "fl",
    version,
    disable_help_subcommand = true,
    about = "Offline scoring engine for a fantasy motorsport league"
)]
pub struct Args {
    /// League root directory (holds Info.json and one directory per season).
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Season year, as keyed in Info.json.
    #[arg(long, value_parser = parse_year)]
    pub year: String,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Errors only on stderr.
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Score every completed race and write all season documents.
    Score {
        /// Recompute even when the run record matches the inputs.
        #[arg(long)]
        force: bool,
    },
    /// Load and score every input without writing anything.
    Validate,
    /// Print the standings table.
    Standings {
        /// Only the first N rows.
        #[arg(long)]
        top: Option<usize>,
    },
    /// Carry team sheets forward to an upcoming race.
    Week {
        /// Race name as listed in the season calendar.
        #[arg(long)]
        race: String,
        /// Overwrite sheets already present for the race.
        #[arg(long)]
        force: bool,
    },
}

impl Args {
    pub fn paths(&self) -> SeasonPaths {
        SeasonPaths::new(&self.root, &self.year)
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Four ASCII digits.
pub fn parse_year(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        Ok(s.to_string())
    } else {
        Err(format!("expected a four-digit year, got `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(argv)
    }

    #[test]
    fn parses_score_with_force() {
        let a = parse(&["fl", "--root", "league", "--year", "2024", "score", "--force"]).unwrap();
        assert_eq!(a.command, Command::Score { force: true });
        assert_eq!(a.paths().season_dir(), PathBuf::from("league").join("Data").join("2024"));
        assert_eq!(a.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn verbosity_flags() {
        let a = parse(&["fl", "--year", "2024", "-vv", "validate"]).unwrap();
        assert_eq!(a.log_level(), tracing::Level::TRACE);
        let a = parse(&["fl", "--year", "2024", "-q", "validate"]).unwrap();
        assert_eq!(a.log_level(), tracing::Level::ERROR);
        assert!(parse(&["fl", "--year", "2024", "-q", "-v", "validate"]).is_err());
    }

    #[test]
    fn week_requires_race() {
        assert!(parse(&["fl", "--year", "2024", "week"]).is_err());
        let a = parse(&["fl", "--year", "2024", "week", "--race", "Monza"]).unwrap();
        assert_eq!(a.command, Command::Week { race: "Monza".into(), force: false });
    }

    #[test]
    fn year_must_be_four_digits() {
        assert!(parse_year("24").is_err());
        assert!(parse_year("20x4").is_err());
        assert_eq!(parse_year(" 2024 ").unwrap(), "2024");
    }
}

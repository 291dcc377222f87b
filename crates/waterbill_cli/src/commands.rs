//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use waterbill_core::Month;

#[derive(Debug, Parser)]
#[command(name = "waterbill")]
#[command(about = "Split a water bill across tower homes by resident-days.")]
#[command(version)]
pub struct CommandLine {
    /// Directory holding the roster database and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Currency symbol printed before amounts
    #[arg(long, global = true)]
    pub currency: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the occupancy grid of every tower (or one tower)
    #[command(alias = "ls")]
    Show {
        /// Tower name, e.g. `A`
        #[arg(long)]
        tower: Option<String>,
    },
    /// Set residents and/or days stayed for one home
    Set {
        /// Home reference: `A-1-2` or `A1B`
        home: String,
        #[arg(long, short = 'r')]
        residents: Option<u32>,
        #[arg(
            long,
            short = 'd',
            value_parser = clap::value_parser!(u32).range(0..=i64::from(Month::MAX_DAYS))
        )]
        days: Option<u32>,
    },
    /// Select a month; every home's days stayed becomes its day count
    Month {
        /// `1..12`, a month name, or a 3-letter abbreviation
        month: String,
    },
    /// List selectable months
    Months,
    /// Calculate each home's share of a total bill
    #[command(alias = "calc")]
    Calculate {
        /// Total bill amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Print-formatted output without interactive hints
        #[arg(long)]
        print: bool,
    },
    /// Regenerate the default roster with zero occupancy
    Reset,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandLine, Commands};
    use clap::Parser;

    #[test]
    fn set_accepts_short_flags() {
        let cli = CommandLine::try_parse_from(["waterbill", "set", "A-1-1", "-r", "2", "-d", "28"])
            .expect("set should parse");
        match cli.command {
            Commands::Set {
                home,
                residents,
                days,
            } => {
                assert_eq!(home, "A-1-1");
                assert_eq!(residents, Some(2));
                assert_eq!(days, Some(28));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn negative_residents_are_rejected_by_parser() {
        assert!(CommandLine::try_parse_from(["waterbill", "set", "A1A", "-r", "-1"]).is_err());
    }

    #[test]
    fn days_beyond_longest_month_are_rejected_by_parser() {
        assert!(CommandLine::try_parse_from(["waterbill", "set", "A1A", "-d", "31"]).is_ok());
        assert!(CommandLine::try_parse_from(["waterbill", "set", "A1A", "-d", "32"]).is_err());
        assert!(CommandLine::try_parse_from(["waterbill", "set", "A1A", "--days", "99"]).is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = CommandLine::try_parse_from([
            "waterbill",
            "calc",
            "2800",
            "--print",
            "--currency",
            "$",
            "--data-dir",
            "/tmp/wb",
        ])
        .expect("calculate should parse");
        assert_eq!(cli.currency.as_deref(), Some("$"));
        assert!(cli.data_dir.is_some());
        assert!(matches!(cli.command, Commands::Calculate { print: true, .. }));
    }
}

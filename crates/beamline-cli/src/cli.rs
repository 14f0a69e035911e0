use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Beamline developers",
    version,
    about = "Beamline CLI - Resolve element placements in transport lines and export them as tables for a tracking code.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a line description, close its gaps with drifts and write the element table.
    Expand(ExpandArgs),
    /// Load a Twiss table, optionally slice it, and write the selected columns.
    Twiss(TwissArgs),
}

/// Arguments for the `expand` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ExpandArgs {
    /// Path to the line description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub line: PathBuf,

    /// Path for the CSV output. Defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a settings file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Placement Overrides ---
    /// Element keyword used for the inserted gap fillers (e.g. DRIFT).
    #[arg(long, value_name = "KEYWORD")]
    pub drift_kind: Option<String>,

    /// Point of an element that a bare `at` refers to: entry, center or exit.
    #[arg(long, value_name = "POINT")]
    pub reference_placement: Option<String>,

    /// Name of the element attribute holding its length.
    #[arg(long, value_name = "NAME")]
    pub length_key: Option<String>,

    /// Gaps at or below this distance are not filled (e.g. "1e-6", "2 um").
    #[arg(long, value_name = "LENGTH")]
    pub epsilon: Option<String>,

    /// Maximum number of derivation passes per element.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Resolve placements only; do not insert drifts.
    #[arg(long)]
    pub no_expand: bool,
}

/// Arguments for the `twiss` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TwissArgs {
    /// Path to the TFS file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// First element of the slice (inclusive).
    #[arg(long, value_name = "NAME")]
    pub from: Option<String>,

    /// Last element of the slice (inclusive).
    #[arg(long, value_name = "NAME")]
    pub to: Option<String>,

    /// Columns to keep, comma separated. NAME is always kept.
    #[arg(long, value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Path for the CSV output. Defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn expand_arguments_are_parsed() {
        let cli = Cli::try_parse_from([
            "beamline",
            "-vv",
            "expand",
            "--line",
            "line.toml",
            "--reference-placement",
            "center",
            "--epsilon",
            "2 um",
            "--no-expand",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Expand(args) => {
                assert_eq!(args.line, PathBuf::from("line.toml"));
                assert_eq!(args.reference_placement.as_deref(), Some("center"));
                assert_eq!(args.epsilon.as_deref(), Some("2 um"));
                assert!(args.no_expand);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn twiss_columns_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "beamline", "twiss", "-i", "twiss.tfs", "--columns", "S,BETX", "--from", "QF1",
        ])
        .unwrap();
        match cli.command {
            Commands::Twiss(args) => {
                assert_eq!(args.columns, ["S", "BETX"]);
                assert_eq!(args.from.as_deref(), Some("QF1"));
                assert!(args.to.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["beamline", "-q", "-v", "twiss", "-i", "x.tfs"]).is_err());
    }
}

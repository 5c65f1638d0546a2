use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "alchemist", version, about = "Normalize and validate client/worker/task sheets")]
pub struct Args {
    /// Explicit config file. Defaults to ~/.alchemist/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Never call the completion oracle, even when one is configured.
    #[arg(long, global = true)]
    pub no_oracle: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// The three row files (JSON arrays of objects) of one dataset.
#[derive(ClapArgs, Debug, Clone)]
pub struct DataFiles {
    #[arg(long)]
    pub clients: PathBuf,

    #[arg(long)]
    pub workers: PathBuf,

    #[arg(long)]
    pub tasks: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long)]
    pub file: PathBuf,

    /// clients, workers or tasks. Detected from the file name and headers when omitted.
    #[arg(long)]
    pub kind: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub files: DataFiles,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Attach remediation steps per finding.
    #[arg(long)]
    pub corrections: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RuleArgs {
    /// Free-text rule, e.g. "T1 and T2 must run together".
    #[arg(long)]
    pub text: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub files: DataFiles,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub files: DataFiles,

    #[arg(long)]
    pub query: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ModifyArgs {
    #[command(flatten)]
    pub files: DataFiles,

    /// Natural-language edit, e.g. "set Duration to 2 for T1".
    #[arg(long)]
    pub command: String,

    /// Apply every suggested change and print the revalidated report.
    #[arg(long)]
    pub apply: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map one file's headers and print canonical records.
    Ingest(IngestArgs),
    /// Ingest all three files and print the validation report.
    Validate(ValidateArgs),
    /// Convert free text into a rule.
    Rule(RuleArgs),
    /// Suggest rules for a dataset.
    Recommend(RecommendArgs),
    /// Filter the dataset with a natural-language query.
    Query(QueryArgs),
    /// Suggest (and optionally apply) edits for a natural-language command.
    Modify(ModifyArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_parses_files_and_format() {
        let args = Args::try_parse_from([
            "alchemist", "validate", "--clients", "c.json", "--workers", "w.json", "--tasks",
            "t.json", "--format", "json", "--no-oracle",
        ])
        .unwrap();
        assert!(args.no_oracle);
        match args.command {
            Commands::Validate(v) => {
                assert_eq!(v.format, OutputFormat::Json);
                assert_eq!(v.files.tasks, PathBuf::from("t.json"));
                assert!(!v.corrections);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn modify_defaults_to_preview() {
        let args = Args::try_parse_from([
            "alchemist", "modify", "--clients", "c", "--workers", "w", "--tasks", "t",
            "--command", "raise C1 priority",
        ])
        .unwrap();
        match args.command {
            Commands::Modify(m) => {
                assert_eq!(m.command, "raise C1 priority");
                assert!(!m.apply);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn query_requires_text() {
        assert!(Args::try_parse_from([
            "alchemist", "query", "--clients", "c", "--workers", "w", "--tasks", "t"
        ])
        .is_err());
    }
}

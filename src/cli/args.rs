use clap::{Parser, Subcommand, ValueEnum};

/// tidyfs — a safety-first filesystem maintenance utility
#[derive(Parser, Debug)]
#[command(
    name = "tidyfs",
    version,
    about = "Cache cleanup, duplicate detection, and filename normalization",
    long_about = "tidyfs cleans caches and stale logs, finds duplicate files by\n\
                  content, and normalizes filenames. Every mutation goes through\n\
                  a preview-aware gate; dry-run is the default.",
    after_help = "EXAMPLES:\n  \
        tidyfs run                         All three operations, preview mode\n  \
        tidyfs run --apply                 All three operations, for real\n  \
        tidyfs dup ~/Pictures              Find duplicates under a directory\n  \
        tidyfs dup --min-size 4096         Only consider files over 4 KiB\n  \
        tidyfs rename ~/Downloads          Preview filename normalization\n  \
        tidyfs rename ~/Downloads --apply  Normalize for real\n  \
        tidyfs clean --apply               Remove caches and stale logs\n  \
        tidyfs config show                 Show effective configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Perform actions for real (default is preview)
    #[arg(long, global = true, conflicts_with = "dry_run")]
    pub apply: bool,

    /// Preview actions without performing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode, minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all three operations in sequence (scheduler entry point)
    Run,

    /// Remove cache paths and stale log files
    Clean,

    /// Find duplicate files by content (detection only, never deletes)
    Dup {
        /// Directory to scan (default: configured dup_dir)
        path: Option<String>,

        /// Only consider files strictly larger than this many bytes
        #[arg(long)]
        min_size: Option<u64>,

        /// Show per-group details after the summary
        #[arg(long)]
        detailed: bool,
    },

    /// Normalize filenames in one directory (non-recursive)
    Rename {
        /// Directory to normalize (default: configured rename_dir)
        dir: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Initialize tidyfs directories and default config
    Init,
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

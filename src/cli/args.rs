use clap::{Parser, Subcommand, ValueEnum};

/// Reclaim — a category-driven disk cleanup and duplicate finder
#[derive(Parser, Debug)]
#[command(
    name = "reclaim",
    version,
    about = "Scan, clean, and deduplicate disk space",
    long_about = "Reclaim scans well-known junk locations (temp files, caches,\n\
                   stale logs, old downloads), removes them safely with optional\n\
                   backups, and finds duplicate files by content.",
    after_help = "EXAMPLES:\n  \
        reclaim scan                           Scan every category\n  \
        reclaim scan --category temp           Scan temp files only\n  \
        reclaim clean --dry-run                Preview what clean would remove\n  \
        reclaim clean --category logs --backup Clean old logs, backup first\n  \
        reclaim dup ~/Downloads                Find duplicates under Downloads\n  \
        reclaim dup ~/Pictures --delete        Remove redundant copies\n  \
        reclaim restore --list                 List available backups\n  \
        reclaim categories                     Show known categories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (debug logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode with minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan for cleanable files
    Scan {
        /// Only scan specific categories (repeatable)
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Show individual files in results
        #[arg(long)]
        detailed: bool,
    },

    /// Remove files found by a scan
    Clean {
        /// Only clean specific categories (repeatable)
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Show what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Copy files to a backup directory before removal
        #[arg(long)]
        backup: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Find duplicate files
    Dup {
        /// Directory to scan for duplicates
        #[arg(default_value = "~")]
        path: String,

        /// Minimum file size in bytes (overrides config)
        #[arg(long, value_name = "BYTES")]
        min_size: Option<u64>,

        /// Show every file in each group
        #[arg(long)]
        detailed: bool,

        /// Remove redundant copies, keeping one file per group
        #[arg(long)]
        delete: bool,

        /// Back up copies before deleting them
        #[arg(long)]
        backup: bool,

        /// Skip per-group confirmation when deleting
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Restore files from a backup directory
    Restore {
        /// Backup directory (defaults to the most recent backup)
        dir: Option<String>,

        /// List available backups
        #[arg(long)]
        list: bool,
    },

    /// List known categories for this platform
    Categories,

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

    /// Write a default config file
    Init,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

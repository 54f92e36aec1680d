use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fileview_core::models::{SizeBucket, SortField};

#[derive(Parser)]
#[command(name = "fileview")]
#[command(about = "Browse a record's file attachments from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Attachment fixture (JSON); falls back to FILEVIEW_FIXTURE
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Gallery config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the gallery after replaying interactions
    #[command(alias = "ls")]
    Show {
        /// Select a sort field (repeat to flip direction)
        #[arg(long = "sort", value_enum, value_name = "FIELD")]
        sorts: Vec<SortArg>,
        /// Toggle a size filter (repeatable)
        #[arg(long = "toggle", value_enum, value_name = "FILTER")]
        toggles: Vec<FilterArg>,
        /// Number of "load more" rounds
        #[arg(long, default_value = "0")]
        more: usize,
        /// JSON list of files to upload before rendering
        #[arg(long, value_name = "PATH")]
        upload: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the preview navigation for an attachment
    Preview {
        /// Attachment ID
        id: String,
        /// Number of "load more" rounds before opening the preview
        #[arg(long, default_value = "0")]
        more: usize,
    },
    /// Print the navigation to the full attachments list
    RelatedList,
    /// Inspect or create the gallery config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective config
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortArg {
    CreatedDate,
    Title,
    Size,
}

impl From<SortArg> for SortField {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::CreatedDate => Self::CreatedDate,
            SortArg::Title => Self::Title,
            SortArg::Size => Self::Size,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FilterArg {
    #[value(name = "gt100KB", alias = "large")]
    Large,
    #[value(name = "lt100KBgt10KB", alias = "medium")]
    Medium,
    #[value(name = "lt10KB", alias = "small")]
    Small,
}

impl From<FilterArg> for SizeBucket {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::Large => Self::Large,
            FilterArg::Medium => Self::Medium,
            FilterArg::Small => Self::Small,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

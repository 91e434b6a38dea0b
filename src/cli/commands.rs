use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// `Draftwright` - document-editing assistant gateway.
#[derive(Parser, Debug)]
#[command(name = "draftwright")]
#[command(version)]
#[command(about = "Turns agent output into validated document patches.", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to DRAFTWRIGHT_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service
    Serve {
        /// Bind host (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Config file (default: ~/.draftwright/config.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render the prompt an edit or chat request would send, without calling the agent
    Prompt {
        #[arg(long, value_enum, default_value_t = PromptKind::Edit)]
        kind: PromptKind,

        /// Edit mode, A (ops) or B (full markdown)
        #[arg(long, default_value = "A")]
        mode: String,

        /// Edit instruction
        #[arg(long)]
        instruction: Option<String>,

        /// Chat message
        #[arg(long)]
        message: Option<String>,

        /// Document to embed; `.json` is read as a structured snapshot,
        /// `.html`/`.htm` as markup, anything else as Markdown
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        base_hash: Option<String>,

        #[arg(long)]
        schema_hints: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    Edit,
    Chat,
}

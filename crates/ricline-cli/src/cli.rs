//! CLI argument definitions for ricline.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | Fetch snapshot quotes for one or more RICs |
//! | `history` | Fetch historical interday series |
//! | `headlines` | Search news headlines |
//! | `story` | Fetch one news story by id |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--config` | none | Platform config file path |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Snapshot quotes for two currency RICs
//! ricline snapshot THB= JPY= --fields BID,ASK
//!
//! # Weekly interday history
//! ricline history AMD.O NVDA.O --interval weekly --start 2025-10-01 --end 2025-11-10
//!
//! # News, then the story behind a headline
//! ricline headlines "semiconductors" --count 10
//! ricline story urn:newsml:reuters.com:20251110:nNRA1:1
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market data access CLI for the LSEG Data Platform.
///
/// Opens a platform session, runs one retrieval call, prints the result,
/// and closes the session again.
#[derive(Debug, Parser)]
#[command(
    name = "ricline",
    author,
    version,
    about = "Platform session and market data CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Platform config file (JSON). Falls back to RICLINE_* env vars.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch snapshot quote(s) for one or more RICs.
    ///
    /// Returns one row per instrument with the requested fields in
    /// request order.
    ///
    /// # Examples
    ///
    ///   ricline snapshot THB= JPY=
    ///   ricline snapshot AMD.O --fields BID,ASK,TRDPRC_1
    Snapshot(SnapshotArgs),

    /// Fetch historical interday series.
    ///
    /// Returns one dated series per instrument for the chosen interval,
    /// newest rows last.
    ///
    /// # Examples
    ///
    ///   ricline history AMD.O NVDA.O
    ///   ricline history AMD.O --interval weekly --start 2025-10-01 --end 2025-11-10
    History(HistoryArgs),

    /// Search news headlines.
    ///
    /// Prints story ids alongside headline text; feed an id to `story`
    /// to read the full text.
    ///
    /// # Examples
    ///
    ///   ricline headlines "rate decision"
    ///   ricline headlines semiconductors --count 5
    Headlines(HeadlinesArgs),

    /// Fetch one news story by id.
    ///
    /// # Examples
    ///
    ///   ricline story urn:newsml:reuters.com:20251110:nNRA1:1
    Story(StoryArgs),
}

/// Arguments for the `snapshot` command.
#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// One or more instrument codes (e.g. THB=, JPY=, AMD.O).
    #[arg(required = true, num_args = 1..)]
    pub rics: Vec<String>,

    /// Comma-separated field mnemonics.
    #[arg(long, value_delimiter = ',', default_value = "BID,ASK")]
    pub fields: Vec<String>,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// One or more instrument codes.
    #[arg(required = true, num_args = 1..)]
    pub rics: Vec<String>,

    /// Comma-separated field mnemonics.
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "BID,ASK,OPEN_PRC,HIGH_1,LOW_1,TRDPRC_1,NUM_MOVES,TRNOVR_UNS"
    )]
    pub fields: Vec<String>,

    /// Summarization interval: daily, weekly or monthly.
    #[arg(long, default_value = "weekly")]
    pub interval: String,

    /// Range start date (YYYY-MM-DD). Requires --end.
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Range end date (YYYY-MM-DD). Requires --start.
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Maximum number of rows per instrument.
    #[arg(long, default_value_t = 15)]
    pub count: usize,
}

/// Arguments for the `headlines` command.
#[derive(Debug, Args)]
pub struct HeadlinesArgs {
    /// Free-text news query.
    pub query: String,

    /// Maximum number of headlines to return.
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

/// Arguments for the `story` command.
#[derive(Debug, Args)]
pub struct StoryArgs {
    /// Story id as printed by the `headlines` command.
    pub story_id: String,
}

//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use lkm_core::record::{Area, CrewSchema};

#[derive(Parser)]
#[command(name = "lkm", about = "LKM downtime workbook ingestion and analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for the `ingest` subcommand.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// UTF-8 CSV with display-label headers (default).
    Csv,
    /// Pretty-printed JSON records.
    Json,
}

/// Which schema revision names the crew/shift column.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CrewSchemaArg {
    /// Older files: a `Shift` column, cleaned (`1` → `Shift 1`).
    Shift,
    /// Newer files: a `Regu` column, cast raw with no cleanup.
    Regu,
}

impl CrewSchemaArg {
    pub fn to_schema(self) -> CrewSchema {
        match self {
            Self::Shift => CrewSchema::Shift,
            Self::Regu => CrewSchema::Regu,
        }
    }
}

/// Production-area filter values.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AreaArg {
    Injection,
    Filling,
    Cutting,
    Packing,
}

impl AreaArg {
    pub fn to_area(self) -> Area {
        match self {
            Self::Injection => Area::Injection,
            Self::Filling => Area::Filling,
            Self::Cutting => Area::Cutting,
            Self::Packing => Area::Packing,
        }
    }
}

/// All top-level subcommands exposed by the `lkm` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Ingest a downtime workbook and print the normalized table.
    Ingest {
        /// Path to an .xlsx workbook, or an http(s) URL.
        #[arg(value_name = "SOURCE")]
        source: String,
        /// Output format.
        #[arg(long, default_value = "csv")]
        format: OutputFormat,
        /// Write output to a file instead of stdout.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Crew column schema revision.
        #[arg(long, default_value = "shift")]
        crew_schema: CrewSchemaArg,
        /// Restrict output to this area (repeatable).
        #[arg(long, value_name = "AREA")]
        area: Vec<AreaArg>,
        /// Keep only events on or after this date (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        since: Option<NaiveDate>,
        /// Keep only events on or before this date (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        until: Option<NaiveDate>,
        /// Sort records by total downtime, largest first.
        #[arg(long)]
        sort: bool,
    },

    /// Print a summary of a workbook without dumping the table.
    Inspect {
        /// Path to an .xlsx workbook, or an http(s) URL.
        #[arg(value_name = "SOURCE")]
        source: String,
        /// Crew column schema revision.
        #[arg(long, default_value = "shift")]
        crew_schema: CrewSchemaArg,
    },

    /// Print the lkm-core library version.
    Version,
}

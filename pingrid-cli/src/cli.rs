//! CLI argument definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use simplelog::LevelFilter;

use crate::data::Schema;

#[derive(Parser)]
#[command(
    name = "pingrid-cli",
    version,
    about = "Paginated data grid with pinned rows",
    long_about = "Drive a server-paginated data grid from the terminal.\n\n\
                  `serve` exposes generated rows over the JSON fetch contract,\n\
                  `demo` walks through a scripted session and `repl` reads\n\
                  grid intents from stdin."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write logs to this file.
    #[arg(long = "log-file", value_name = "PATH", default_value = "pingrid.log", global = true)]
    pub log_file: PathBuf,

    /// Log level written to the log file.
    #[arg(long = "log-level", value_enum, default_value = "info", global = true)]
    pub log_level: LogLevelArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve generated rows on `POST /api/users`.
    Serve(ServeArgs),

    /// Run a scripted session and print the grid after each step.
    Demo(SessionArgs),

    /// Read grid commands from stdin.
    Repl(SessionArgs),
}

/// Options shared by everything that generates sample rows.
#[derive(Args, Clone)]
pub struct DataArgs {
    /// Sample schema to generate.
    #[arg(long = "schema", value_enum, default_value = "people")]
    pub schema: Schema,

    /// Number of rows to generate.
    #[arg(long = "rows", default_value_t = 1000)]
    pub rows: usize,

    /// Seed for the row generator.
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Artificial latency per fetch, in milliseconds.
    #[arg(long = "latency-ms", default_value_t = 500)]
    pub latency_ms: u64,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Address to listen on.
    #[arg(long = "addr", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,
}

#[derive(Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Fetch pages from a running `serve` endpoint instead of local rows.
    #[arg(long = "remote", value_name = "URL")]
    pub remote: Option<String>,

    /// Initial page size.
    #[arg(long = "page-size", default_value_t = 10)]
    pub page_size: usize,

    /// Most pages kept in the page cache.
    #[arg(long = "cache-entries", default_value_t = 256)]
    pub cache_entries: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

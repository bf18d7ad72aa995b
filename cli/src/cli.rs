use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use rdf_harvest::extract::CyclePolicy;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(about, version, name = "rdf-harvest")]
/// Extracts restaurant records from RDF crawl dumps and reconciles them with other sources
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
    /// Maximum level of the log lines written to stderr
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
    /// Shortcut for --log-level=debug
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    pub fn level_filter(&self) -> LevelFilter {
        let debug = self.verbose || matches!(self.command, Command::Extract { debug: true, .. });
        match self.log_level {
            Some(level) => level.into(),
            None if debug => LevelFilter::DEBUG,
            None => LevelFilter::INFO,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the restaurant records of an N-Triples or N-Quads dump into a JSON array
    Extract {
        /// Dump to read
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// JSON file to write
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Log every line that could not be parsed
        #[arg(long)]
        debug: bool,
        /// Log progress every time this many records have been extracted
        #[arg(long, default_value_t = 10_000)]
        progress_interval: usize,
        /// What to do with blank nodes that reference themselves
        #[arg(long, value_enum, default_value_t = OnCycle::Reject)]
        on_cycle: OnCycle,
        /// Maximum nesting depth of blank nodes
        #[arg(long, default_value_t = 256)]
        max_depth: usize,
    },
    /// Remove records with the same key, keeping the first one
    Dedupe {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Name of the output file, written next to the input
        ///
        /// By default `<input stem>.deduped.json`.
        #[arg(long)]
        output_name: Option<String>,
        /// Field used as key
        #[arg(long, default_value = "url")]
        key: String,
    },
    /// Keep the records that belong to the allowed hosts, without duplicates
    Filter {
        /// JSON arrays of records
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        inputs: Vec<PathBuf>,
        /// Allowed host, subdomains are allowed as well
        ///
        /// By default tripadvisor.com.
        #[arg(long = "allow-host", value_hint = ValueHint::Hostname)]
        allow_hosts: Vec<String>,
        /// JSON file to write
        ///
        /// By default `filtered.json` next to the first input.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
    /// Join parsed records with crawled records by their canonical URL
    Merge {
        /// Records extracted from dumps, matched by their `sameAs` URLs
        #[arg(long, value_hint = ValueHint::FilePath)]
        parsed: PathBuf,
        /// Records crawled from the site, matched by their `url`
        #[arg(long, value_hint = ValueHint::FilePath)]
        crawled: PathBuf,
        /// Directory for the four output files
        ///
        /// By default the directory of the parsed records.
        #[arg(long, value_hint = ValueHint::DirPath)]
        output_dir: Option<PathBuf>,
        /// Host whose unmatched parsed records are reported as missing a crawl
        #[arg(long, value_hint = ValueHint::Hostname)]
        target_host: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnCycle {
    /// Skip the affected entity
    Reject,
    /// Replace the back-reference by the blank node label
    Truncate,
}

impl From<OnCycle> for CyclePolicy {
    fn from(on_cycle: OnCycle) -> Self {
        match on_cycle {
            OnCycle::Reject => CyclePolicy::Reject,
            OnCycle::Truncate => CyclePolicy::Truncate,
        }
    }
}

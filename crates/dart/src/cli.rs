use clap::{Parser, Subcommand, ValueEnum};
use dart_spider::config::{DEFAULT_DELAY, DEFAULT_OUTPUT_DIR};
use dart_spider::CorpClass;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect listed corporations and their company overviews from OpenDART,
    /// saving them as CSV files.
    Spider {
        /// Specify the endpoints to webscrape.
        ///
        /// If no endpoints are provided, spider will collect all. `companies`
        /// alone reuses the corporation codes saved by a previous run.
        #[arg(short, long, value_delimiter = ',')]
        endpoints: Option<Vec<Endpoint>>,

        /// Directory the raw downloads and CSV files are written to.
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Pause after each company lookup, in milliseconds.
        #[arg(short, long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
        delay_ms: u64,

        /// Market to keep company overviews for.
        #[arg(short, long, value_enum, default_value_t = Market::Kospi)]
        market: Market,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Every corporation code, filtered to the listed ones.
    Codes,

    /// Company overviews of the listed corporations.
    Companies,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Market {
    /// Yuga-jeungkwon market (`Y`).
    Kospi,

    /// `K`
    Kosdaq,

    /// `N`
    Konex,

    /// Everything else (`E`).
    Other,
}

impl From<Market> for CorpClass {
    fn from(market: Market) -> Self {
        match market {
            Market::Kospi => CorpClass::Kospi,
            Market::Kosdaq => CorpClass::Kosdaq,
            Market::Konex => CorpClass::Konex,
            Market::Other => CorpClass::Other,
        }
    }
}

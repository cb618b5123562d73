mod cli;
mod spider;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use dart_spider::Config;
use std::time::Duration;
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preprocess the trace level
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // set the trace level; without one, run the tui and only report problems
    preprocess(match cli.trace {
        Some(TraceLevel::DEBUG) => Level::DEBUG,
        Some(TraceLevel::ERROR) => Level::ERROR,
        Some(TraceLevel::INFO) => Level::INFO,
        Some(TraceLevel::TRACE) => Level::TRACE,
        Some(TraceLevel::WARN) | None => Level::WARN,
    })?;
    trace!("command line input recorded: {cli:?}");

    let tui = cli.trace.is_none();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `dart spider <Option<Vec<Endpoint>>>`: scrape endpoints
        Spider {
            endpoints,
            output_dir,
            delay_ms,
            market,
        } => {
            // no API key, no run
            let mut config = Config::from_env()?;
            config.output_dir = output_dir;
            config.delay = Duration::from_millis(delay_ms);
            config.market = market.into();
            trace!("configuration: {config:?}");

            // if no endpoints provided, scrape all
            use cli::Endpoint::*;
            let endpoints = endpoints.unwrap_or_else(|| vec![Codes, Companies]);
            spider::run(&config, &endpoints, tui).await?;
        }
    }

    Ok(())
}

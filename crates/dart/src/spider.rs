use crate::cli::Endpoint;
use dart_spider::corp::{self, CorpCodes, OpenDart};
use dart_spider::Config;
use tracing::{debug, error, info};

/// Run the requested spider stages, in order: corporation codes, then
/// company overviews.
pub(crate) async fn run(config: &Config, endpoints: &[Endpoint], tui: bool) -> anyhow::Result<()> {
    let client = OpenDart::new(config)?;
    debug!("OpenDART client built for {}", config.base_url);

    let time = std::time::Instant::now();

    // 1. corporation codes; reuse the last run's table if not scraping them
    let corp_codes = if endpoints.contains(&Endpoint::Codes) {
        let time = std::time::Instant::now();
        let corp_codes = corp::codes::scrape(&client, config, tui).await;
        info!(
            "{} listed corporation codes collected, time elapsed: {:?}",
            corp_codes.len(),
            time.elapsed()
        );
        corp_codes
    } else {
        let path = config.corp_codes_path();
        match CorpCodes::load(&path) {
            Ok(corp_codes) => {
                info!(
                    "{} listed corporation codes loaded from {}",
                    corp_codes.len(),
                    path.display()
                );
                corp_codes
            }
            Err(err) => {
                error!(
                    "failed to load corporation codes from {}, error({err})",
                    path.display()
                );
                CorpCodes::default()
            }
        }
    };

    // 2. company overviews
    if endpoints.contains(&Endpoint::Companies) {
        let time = std::time::Instant::now();
        let companies = corp::company::scrape(&client, &corp_codes, config, tui).await;
        info!(
            "{} {} companies collected, time elapsed: {:?}",
            companies.len(),
            config.market,
            time.elapsed()
        );
    }

    info!(
        "spider finished collecting data, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(())
}

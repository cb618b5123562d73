use crate::corp::{CompanyLookup, CompanyResponse, CorpCodes};
use crate::fs::{self, Record};
use crate::tui::Progress;
use crate::Config;
use futures::{stream, StreamExt};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, trace, warn};

// scrape
// ----------------------------------------------------------------------------

/// Look up every corporation in `corp_codes`, one at a time, keeping those in
/// `config.market`, and save them to [`Config::companies_path`].
///
/// A failed lookup is logged and skipped. `config.delay` is slept after every
/// lookup, whatever its outcome.
pub async fn scrape<C>(client: &C, corp_codes: &CorpCodes, config: &Config, tui: bool) -> Companies
where
    C: CompanyLookup + ?Sized,
{
    let time = std::time::Instant::now();
    info!(
        "fetching detailed company info for {} companies ...",
        config.market
    );

    let progress = Progress::new(corp_codes.len(), tui);
    let mut companies = Vec::new();

    let mut stream = stream::iter(corp_codes.iter());
    while let Some(corp) = stream.next().await {
        match client.company(&corp.corp_code).await {
            Ok(info) if info.is_class(config.market) => {
                if info.corp_code.as_deref() != Some(corp.corp_code.as_str()) {
                    warn!(
                        "company info for {} ({}) came back as corp_code {:?}",
                        corp.corp_name, corp.corp_code, info.corp_code
                    );
                }
                trace!("keeping {} ({})", corp.corp_name, corp.corp_code);
                companies.push(Company::from(info));
                progress.kept.inc(1);
            }
            Ok(_) => trace!(
                "{} ({}) is not in {}",
                corp.corp_name,
                corp.corp_code,
                config.market
            ),
            Err(err) => {
                error!(
                    "failed to fetch company info for {} ({}), error({err})",
                    corp.corp_name, corp.corp_code
                );
                progress.failed.inc(1);
            }
        }
        progress.total.inc(1);

        tokio::time::sleep(config.delay).await;
    }
    progress.finish();

    let companies = Companies(companies);
    let output = config.companies_path();
    companies.save(&output);
    info!(
        "saved {} {} company details to {}. {}",
        companies.len(),
        config.market,
        output.display(),
        crate::time_elapsed(time)
    );

    if tui {
        use colored::Colorize;
        println!(
            "{} {} company details saved to {}",
            companies.len().to_string().green(),
            config.market,
            output.display()
        );
    }

    companies
}

// output
// ----------------------------------------------------------------------------

/// Companies of the target market, in the order they were looked up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Companies(pub Vec<Company>);

/// A company overview. Identity fields come from the company endpoint, not
/// from the directory.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Company {
    pub corp_name: Option<String>,
    pub corp_code: Option<String>,
    pub stock_code: Option<String>,
    pub ceo_name: Option<String>,
    pub industry_code: Option<String>,
    pub established_date: Option<String>,
    pub ir_url: Option<String>,
    pub corp_reg_number: Option<String>,
    pub business_no: Option<String>,
}

impl Record for Company {
    const HEADER: &'static [&'static str] = &[
        "corp_name",
        "corp_code",
        "stock_code",
        "ceo_name",
        "industry_code",
        "established_date",
        "ir_url",
        "corp_reg_number",
        "business_no",
    ];
}

impl From<CompanyResponse> for Company {
    fn from(info: CompanyResponse) -> Self {
        Company {
            corp_name: info.corp_name,
            corp_code: info.corp_code,
            stock_code: info.stock_code,
            ceo_name: info.ceo_nm,
            industry_code: info.induty_code,
            established_date: info.est_dt,
            ir_url: info.ir_url,
            corp_reg_number: info.jurir_no,
            business_no: info.bizr_no,
        }
    }
}

impl Companies {
    pub fn save(&self, path: &Path) {
        fs::save_csv(&self.0, path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Company> {
        self.0.iter()
    }
}

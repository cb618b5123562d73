use crate::corp::OpenDart;
use crate::fs::{self, Record};
use crate::{Config, SpiderError};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, info};

pub const ZIP_FILE: &str = "CORPCODE.zip";
pub const XML_FILE: &str = "CORPCODE.xml";

/// Listed corporations carry a six character stock code.
pub const STOCK_CODE_LEN: usize = 6;

// scrape
// ----------------------------------------------------------------------------

/// Fetch every corporation code from OpenDART and keep the listed ones,
/// saving them to [`Config::corp_codes_path`].
///
/// Never fails: any error is logged and an empty table returned. Use
/// [`fetch`] to see the error instead.
pub async fn scrape(client: &OpenDart, config: &Config, tui: bool) -> CorpCodes {
    match fetch(client, config, tui).await {
        Ok(corp_codes) => corp_codes,
        Err(err) => {
            error!("failed to fetch OpenDART corporation codes, error({err})");
            CorpCodes::default()
        }
    }
}

/// Download `CORPCODE.zip`, extract and parse `CORPCODE.xml`, filter to the
/// listed corporations and save them.
///
/// The raw archive and the extracted document are kept under
/// [`Config::corp_data_dir`].
pub async fn fetch(client: &OpenDart, config: &Config, tui: bool) -> Result<CorpCodes, SpiderError> {
    let time = std::time::Instant::now();
    info!("fetching all corporation codes from OpenDART ...");

    // save the zip first, then extract
    let corp_data_dir = config.corp_data_dir();
    let zip_path = corp_data_dir.join(ZIP_FILE);
    client.download_corp_codes(&zip_path, tui).await?;

    let xml_path = fs::unzip_file(&zip_path, XML_FILE, &corp_data_dir)?;
    let xml = tokio::fs::read_to_string(&xml_path).await?;
    let corp_codes = CorpCodes::from_xml(&xml)?;
    debug!(
        "{} listed corporations parsed. {}",
        corp_codes.len(),
        crate::time_elapsed(time)
    );

    let output = config.corp_codes_path();
    corp_codes.save(&output);
    info!(
        "saved {} listed corporation codes to {}",
        corp_codes.len(),
        output.display()
    );

    if tui {
        use colored::Colorize;
        println!(
            "{} listed corporation codes saved to {}",
            corp_codes.len().to_string().green(),
            output.display()
        );
    }

    Ok(corp_codes)
}

/// Whether a stock code marks a listed corporation: present, and exactly
/// [`STOCK_CODE_LEN`] characters.
pub fn is_listed(stock_code: Option<&str>) -> bool {
    matches!(stock_code, Some(code) if code.chars().count() == STOCK_CODE_LEN)
}

// output
// ----------------------------------------------------------------------------

/// Listed corporations, in directory order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorpCodes(pub Vec<CorpCode>);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorpCode {
    pub corp_code: String,
    pub corp_name: String,
    pub corp_eng_name: String,
    pub stock_code: String,
}

impl Record for CorpCode {
    const HEADER: &'static [&'static str] =
        &["corp_code", "corp_name", "corp_eng_name", "stock_code"];
}

impl CorpCodes {
    /// Parse a `CORPCODE.xml` document, keeping only the listed corporations.
    ///
    /// Only `<list>` elements directly under the root are read, and field
    /// text is taken as-is, without trimming.
    pub fn from_xml(xml: &str) -> Result<Self, SpiderError> {
        let mut reader = Reader::from_str(xml);
        let mut corp_codes = Vec::new();

        let mut depth = 0usize;
        let mut record: Option<RawCorpCode> = None;
        let mut field: Option<Field> = None;
        let mut text = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    if depth == LIST_DEPTH && e.name().as_ref() == b"list" {
                        record = Some(RawCorpCode::default());
                    } else if depth == FIELD_DEPTH && record.is_some() {
                        field = Field::from_name(e.name().as_ref());
                        text.clear();
                    }
                }
                // `<stock_code/>`
                Event::Empty(e) if depth + 1 == FIELD_DEPTH => {
                    if let (Some(record), Some(field)) =
                        (record.as_mut(), Field::from_name(e.name().as_ref()))
                    {
                        record.set(field, String::new());
                    }
                }
                Event::Text(t) if depth == FIELD_DEPTH && field.is_some() => {
                    text.push_str(&t.unescape().map_err(quick_xml::Error::from)?);
                }
                Event::CData(c) if depth == FIELD_DEPTH && field.is_some() => {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
                Event::End(_) => {
                    if depth == FIELD_DEPTH {
                        if let (Some(record), Some(field)) = (record.as_mut(), field.take()) {
                            record.set(field, std::mem::take(&mut text));
                        }
                    } else if depth == LIST_DEPTH {
                        if let Some(record) = record.take() {
                            corp_codes.extend(record.into_listed());
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(CorpCodes(corp_codes))
    }

    /// Load a table written by a previous run.
    pub fn load(path: &Path) -> Result<Self, SpiderError> {
        Ok(CorpCodes(fs::read_csv(path)?))
    }

    pub fn save(&self, path: &Path) {
        fs::save_csv(&self.0, path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorpCode> {
        self.0.iter()
    }
}

impl FromIterator<CorpCode> for CorpCodes {
    fn from_iter<I: IntoIterator<Item = CorpCode>>(iter: I) -> Self {
        CorpCodes(iter.into_iter().collect())
    }
}

// de
// ----------------------------------------------------------------------------

// the document is in the form of:
// `<result>
//      <list>
//          <corp_code>00126380</corp_code>
//          <corp_name>삼성전자</corp_name>
//          <corp_eng_name>SAMSUNG ELECTRONICS CO,.LTD</corp_eng_name>
//          <stock_code>005930</stock_code>
//          <modify_date>20230110</modify_date>
//      </list>
//      ...
//  </result>`
const LIST_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

#[derive(Clone, Copy, Debug)]
enum Field {
    CorpCode,
    CorpName,
    CorpEngName,
    StockCode,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"corp_code" => Some(Field::CorpCode),
            b"corp_name" => Some(Field::CorpName),
            b"corp_eng_name" => Some(Field::CorpEngName),
            b"stock_code" => Some(Field::StockCode),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct RawCorpCode {
    corp_code: Option<String>,
    corp_name: Option<String>,
    corp_eng_name: Option<String>,
    stock_code: Option<String>,
}

impl RawCorpCode {
    // the first occurrence of a field wins
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::CorpCode => &mut self.corp_code,
            Field::CorpName => &mut self.corp_name,
            Field::CorpEngName => &mut self.corp_eng_name,
            Field::StockCode => &mut self.stock_code,
        };
        slot.get_or_insert(value);
    }

    fn into_listed(self) -> Option<CorpCode> {
        if !is_listed(self.stock_code.as_deref()) {
            return None;
        }
        Some(CorpCode {
            corp_code: self.corp_code.unwrap_or_default(),
            corp_name: self.corp_name.unwrap_or_default(),
            corp_eng_name: self.corp_eng_name.unwrap_or_default(),
            stock_code: self.stock_code.unwrap_or_default(),
        })
    }
}

use crate::http::var;
use crate::SpiderError;
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENDART_API_KEY";
pub const BASE_URL_VAR: &str = "OPENDART_URL";
pub const USER_AGENT_VAR: &str = "USER_AGENT";

pub const DEFAULT_BASE_URL: &str = "https://opendart.fss.or.kr";
pub const DEFAULT_OUTPUT_DIR: &str = "data/raw";

/// Pause between company lookups.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(700);

/// Market tier, as reported by the `corp_cls` field of the company endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorpClass {
    /// Yuga-jeungkwon market, `Y`.
    #[default]
    Kospi,
    /// `K`
    Kosdaq,
    /// `N`
    Konex,
    /// Everything else, `E`.
    Other,
}

impl CorpClass {
    /// The sentinel OpenDART uses for this tier.
    pub fn code(&self) -> &'static str {
        match self {
            CorpClass::Kospi => "Y",
            CorpClass::Kosdaq => "K",
            CorpClass::Konex => "N",
            CorpClass::Other => "E",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CorpClass::Kospi => "kospi",
            CorpClass::Kosdaq => "kosdaq",
            CorpClass::Konex => "konex",
            CorpClass::Other => "other",
        }
    }
}

impl std::fmt::Display for CorpClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name().to_uppercase(), self.code())
    }
}

/// Run configuration; the API key is carried here and handed to the client
/// explicitly, never registered globally.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub user_agent: Option<String>,
    pub output_dir: PathBuf,
    pub delay: Duration,
    pub market: CorpClass,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delay: DEFAULT_DELAY,
            market: CorpClass::default(),
        }
    }

    /// Read the API key (required) and the optional base URL and user agent
    /// from the environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, SpiderError> {
        let api_key = non_blank(API_KEY_VAR).ok_or(SpiderError::MissingEnv(API_KEY_VAR))?;

        let mut config = Config::new(api_key);
        if let Some(base_url) = non_blank(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        config.user_agent = non_blank(USER_AGENT_VAR);

        Ok(config)
    }

    /// Directory holding the raw `CORPCODE.zip` and `CORPCODE.xml`.
    pub fn corp_data_dir(&self) -> PathBuf {
        self.output_dir.join("dart_corp_data")
    }

    pub fn corp_codes_path(&self) -> PathBuf {
        self.output_dir.join("listed_corp_codes.csv")
    }

    pub fn companies_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_company_info.csv", self.market.name()))
    }
}

/// An unset and a blank variable read the same.
fn non_blank(name: &str) -> Option<String> {
    var(name).ok().filter(|value| !value.trim().is_empty())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("output_dir", &self.output_dir)
            .field("delay", &self.delay)
            .field("market", &self.market)
            .finish()
    }
}

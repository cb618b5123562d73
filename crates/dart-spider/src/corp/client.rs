use crate::http::HttpClient;
use crate::{Config, CorpClass, SpiderError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::trace;

/// OpenDART's status for a successful request.
pub const STATUS_OK: &str = "000";

/// Anything that can look up a company overview by its corporation code.
#[async_trait]
pub trait CompanyLookup {
    async fn company(&self, corp_code: &str) -> Result<CompanyResponse, SpiderError>;
}

/// HTTP client for the OpenDART API.
///
/// The API key is given at construction and sent as `crtfc_key` on every
/// request.
#[derive(Clone)]
pub struct OpenDart {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl OpenDart {
    pub fn new(config: &Config) -> Result<Self, SpiderError> {
        Ok(OpenDart {
            http_client: crate::std_client_build(config.user_agent.as_deref())?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}", self.base_url)
    }

    /// Download the zipped corporation code directory to `path`.
    pub async fn download_corp_codes(&self, path: &Path, tui: bool) -> Result<u64, SpiderError> {
        trace!("requesting corpCode.xml");
        crate::fs::download_file(
            &self.http_client,
            &self.url("corpCode.xml"),
            &[("crtfc_key", self.api_key.as_str())],
            path,
            tui,
        )
        .await
    }
}

#[async_trait]
impl CompanyLookup for OpenDart {
    async fn company(&self, corp_code: &str) -> Result<CompanyResponse, SpiderError> {
        trace!("requesting company.json for {corp_code}");
        let response = self
            .http_client
            .get(self.url("company.json"))
            .query(&[("crtfc_key", self.api_key.as_str()), ("corp_code", corp_code)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SpiderError::Status(response.status()));
        }

        let body = response.bytes().await?;
        let company: CompanyResponse = serde_json::from_slice(&body)?;
        if company.status != STATUS_OK {
            return Err(SpiderError::Api {
                status: company.status,
                message: company.message,
            });
        }

        Ok(company)
    }
}

// de
// ----------------------------------------------------------------------------

/// Response of `company.json`; fields the spider does not use are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CompanyResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub corp_cls: Option<String>,
    #[serde(default)]
    pub corp_name: Option<String>,
    #[serde(default)]
    pub corp_code: Option<String>,
    #[serde(default)]
    pub stock_code: Option<String>,
    #[serde(default)]
    pub ceo_nm: Option<String>,
    #[serde(default)]
    pub induty_code: Option<String>,
    #[serde(default)]
    pub est_dt: Option<String>,
    #[serde(default)]
    pub ir_url: Option<String>,
    #[serde(default)]
    pub jurir_no: Option<String>,
    #[serde(default)]
    pub bizr_no: Option<String>,
}

impl CompanyResponse {
    /// Exact, case-sensitive match of `corp_cls` against the market's sentinel.
    pub fn is_class(&self, market: CorpClass) -> bool {
        self.corp_cls.as_deref() == Some(market.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_class(corp_cls: Option<&str>) -> CompanyResponse {
        CompanyResponse {
            status: STATUS_OK.to_string(),
            corp_cls: corp_cls.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn class_match_is_exact() {
        assert!(with_class(Some("Y")).is_class(CorpClass::Kospi));
        assert!(!with_class(Some("y")).is_class(CorpClass::Kospi));
        assert!(!with_class(Some("Y ")).is_class(CorpClass::Kospi));
        assert!(!with_class(Some("K")).is_class(CorpClass::Kospi));
        assert!(!with_class(None).is_class(CorpClass::Kospi));
        assert!(with_class(Some("K")).is_class(CorpClass::Kosdaq));
    }

    #[test]
    fn deserialize_company_json() {
        let body = r#"{
            "status": "000",
            "message": "정상",
            "corp_code": "00126380",
            "corp_name": "삼성전자(주)",
            "corp_name_eng": "SAMSUNG ELECTRONICS CO,.LTD",
            "stock_name": "삼성전자",
            "stock_code": "005930",
            "ceo_nm": "한종희, 경계현",
            "corp_cls": "Y",
            "jurir_no": "1301110006246",
            "bizr_no": "1248100998",
            "adres": "경기도 수원시 영통구  삼성로 129 (매탄동)",
            "hm_url": "www.samsung.com/sec",
            "ir_url": "",
            "phn_no": "02-2255-0114",
            "fax_no": "031-200-7538",
            "induty_code": "264",
            "est_dt": "19690113",
            "acc_mt": "12"
        }"#;

        let company: CompanyResponse = serde_json::from_str(body).unwrap();
        assert_eq!(company.status, "000");
        assert_eq!(company.corp_code.as_deref(), Some("00126380"));
        assert_eq!(company.stock_code.as_deref(), Some("005930"));
        assert_eq!(company.ceo_nm.as_deref(), Some("한종희, 경계현"));
        assert_eq!(company.ir_url.as_deref(), Some(""));
        assert_eq!(company.est_dt.as_deref(), Some("19690113"));
        assert!(company.is_class(CorpClass::Kospi));
    }

    #[test]
    fn deserialize_error_status() {
        let body = r#"{"status": "013", "message": "조회된 데이타가 없습니다."}"#;
        let company: CompanyResponse = serde_json::from_str(body).unwrap();
        assert_eq!(company.status, "013");
        assert!(company.corp_cls.is_none());
    }
}

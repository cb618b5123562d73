use dart_spider::corp::{company, CompanyLookup, CorpCode, CorpCodes, OpenDart};
use dart_spider::{Config, CorpClass, SpiderError};
use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

const API_KEY: &str = "test-key";

fn config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::new(API_KEY);
    config.base_url = base_url.to_string();
    config.output_dir = dir.to_path_buf();
    config.delay = Duration::ZERO;
    config
}

fn overview(corp_code: &str, corp_cls: &str, ir_url: &str) -> serde_json::Value {
    json!({
        "status": "000",
        "message": "정상",
        "corp_code": corp_code,
        "corp_name": format!("회사 {corp_code}"),
        "corp_name_eng": "COMPANY",
        "stock_name": "회사",
        "stock_code": format!("A{}", &corp_code[3..]),
        "ceo_nm": "대표",
        "corp_cls": corp_cls,
        "jurir_no": "1101110000000",
        "bizr_no": "1000000000",
        "adres": "서울특별시",
        "hm_url": "",
        "ir_url": ir_url,
        "phn_no": "02-000-0000",
        "fax_no": "",
        "induty_code": "264",
        "est_dt": "19690113",
        "acc_mt": "12"
    })
}

fn corp_codes(codes: &[&str]) -> CorpCodes {
    codes
        .iter()
        .map(|code| CorpCode {
            corp_code: code.to_string(),
            corp_name: format!("회사 {code}"),
            corp_eng_name: "COMPANY".to_string(),
            stock_code: format!("A{}", &code[3..]),
        })
        .collect()
}

#[tokio::test]
async fn lookup_company() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/company.json")
                .query_param("crtfc_key", API_KEY)
                .query_param("corp_code", "00126380");
            then.status(200)
                .json_body(overview("00126380", "Y", "https://ir.example.com"));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = OpenDart::new(&config(&server.base_url(), dir.path())).unwrap();
    let info = client.company("00126380").await.unwrap();
    mock.assert_async().await;

    assert_eq!(info.corp_code.as_deref(), Some("00126380"));
    assert_eq!(info.ir_url.as_deref(), Some("https://ir.example.com"));
    assert!(info.is_class(CorpClass::Kospi));
}

#[tokio::test]
async fn lookup_reports_api_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/company.json");
            then.status(200)
                .json_body(json!({"status": "020", "message": "요청 제한을 초과하였습니다."}));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = OpenDart::new(&config(&server.base_url(), dir.path())).unwrap();
    let err = client.company("00126380").await.unwrap_err();

    assert!(matches!(err, SpiderError::Api { ref status, .. } if status == "020"));
}

#[tokio::test]
async fn lookup_rejects_garbage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/company.json");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = OpenDart::new(&config(&server.base_url(), dir.path())).unwrap();

    assert!(matches!(
        client.company("00126380").await,
        Err(SpiderError::Json(_))
    ));
}

#[tokio::test]
async fn scrape_kospi_companies() {
    // -- MOCK OPENDART --
    // four answers (two KOSPI, one KOSDAQ, one KONEX); 00000003 is unknown and 404s
    let server = MockServer::start_async().await;
    let mut mocks = Vec::new();
    for (corp_code, corp_cls, ir_url) in [
        ("00000001", "Y", "https://ir.one.example.com"),
        ("00000002", "K", ""),
        ("00000004", "N", ""),
        ("00000005", "Y", ""),
    ] {
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/company.json")
                    .query_param("corp_code", corp_code);
                then.status(200).json_body(overview(corp_code, corp_cls, ir_url));
            })
            .await;
        mocks.push(mock);
    }

    // -- SCRAPE --
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server.base_url(), dir.path());
    let client = OpenDart::new(&config).unwrap();
    let input = corp_codes(&["00000001", "00000002", "00000003", "00000004", "00000005"]);
    let companies = company::scrape(&client, &input, &config, false).await;

    for mock in &mocks {
        mock.assert_async().await;
    }

    // -- TABLE --
    let codes: Vec<_> = companies
        .iter()
        .map(|c| c.corp_code.clone().unwrap())
        .collect();
    assert_eq!(codes, ["00000001", "00000005"]);
    assert_eq!(companies.0[0].ceo_name.as_deref(), Some("대표"));
    assert_eq!(companies.0[0].corp_reg_number.as_deref(), Some("1101110000000"));

    // -- FILE --
    let csv = std::fs::read_to_string(dir.path().join("kospi_company_info.csv")).unwrap();
    assert_eq!(
        csv,
        "corp_name,corp_code,stock_code,ceo_name,industry_code,established_date,ir_url,corp_reg_number,business_no\n\
         회사 00000001,00000001,A00001,대표,264,19690113,https://ir.one.example.com,1101110000000,1000000000\n\
         회사 00000005,00000005,A00005,대표,264,19690113,,1101110000000,1000000000\n"
    );
}

#[tokio::test]
async fn unreachable_server_skips_every_company() {
    let dir = tempfile::tempdir().unwrap();
    let config = config("http://127.0.0.1:1", dir.path());
    let client = OpenDart::new(&config).unwrap();

    let companies = company::scrape(&client, &corp_codes(&["00000001", "00000002"]), &config, false).await;

    assert!(companies.is_empty());
    let csv = std::fs::read_to_string(config.companies_path()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

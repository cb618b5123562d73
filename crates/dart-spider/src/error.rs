use thiserror::Error;

/// Everything that can go wrong while collecting OpenDART data.
///
/// The spider stages catch these at their boundary and degrade to empty
/// tables; the fallible functions underneath return them as-is.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("environment variable {0} is missing or empty")]
    MissingEnv(&'static str),

    /// The request URL is stripped, as it carries the API key.
    #[error("http request failed, error({0})")]
    Http(reqwest::Error),

    #[error("unexpected http status {0}")]
    Status(reqwest::StatusCode),

    #[error("file system error, error({0})")]
    Io(#[from] std::io::Error),

    #[error("invalid zip archive, error({0})")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to parse XML, error({0})")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to read/write CSV, error({0})")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON, error({0})")]
    Json(#[from] serde_json::Error),

    /// OpenDART answered, but with a status other than `000`.
    #[error("OpenDART status {status}: {message}")]
    Api { status: String, message: String },
}

impl From<reqwest::Error> for SpiderError {
    fn from(err: reqwest::Error) -> Self {
        SpiderError::Http(err.without_url())
    }
}

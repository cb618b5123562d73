pub mod config;
pub mod corp;
pub mod error;
pub mod fs;
pub(crate) mod tui;

pub use config::{Config, CorpClass};
pub use error::SpiderError;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}
use crate::http::HttpClient;

/// Build the HTTP client shared by every OpenDART request.
pub(crate) fn std_client_build(user_agent: Option<&str>) -> Result<HttpClient, SpiderError> {
    let builder = reqwest::ClientBuilder::new();
    let builder = match user_agent {
        Some(user_agent) => builder.user_agent(user_agent),
        None => builder,
    };
    Ok(builder.build()?)
}

pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:?}", time.elapsed())
}

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::log;

use crate::config_handler::Config;
use crate::models_external::fixture::FixturesRsp;

const INCLUDES: &str = "participants;scores;league.country;state";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("upstream returned no fixture list: {}", .0.as_deref().unwrap_or("no message"))]
    NoFixtures(Option<String>),

    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream responded {0}")]
    Status(u16),

    #[error("upstream body could not be parsed: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::NoFixtures(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the viewer.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NoFixtures(Some(message)) => message.clone(),
            FetchError::NoFixtures(None) => "API error".to_string(),
            _ => "Failed to fetch matches".to_string(),
        }
    }
}

pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    api_token: SecretString,
}

impl RestClient {
    pub fn new(config: &Config) -> anyhow::Result<RestClient> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(RestClient {
            client,
            base_url: config.sportmonks_url.trim_end_matches('/').to_string(),
            api_token: SecretString::new(config.api_token.expose_secret().to_owned().into_boxed_str()),
        })
    }

    pub async fn get_fixtures_today(&self) -> Result<Vec<Value>, FetchError> {
        self.get_fixtures(Utc::now().date_naive()).await
    }

    pub async fn get_fixtures(&self, date: NaiveDate) -> Result<Vec<Value>, FetchError> {
        let path = format!("/fixtures/date/{}", date.format("%Y-%m-%d"));
        let rsp: FixturesRsp = self.get_call(&path).await?;
        match rsp.data {
            Some(data) => Ok(data),
            None => {
                log::error!("[REST] No fixtures {path}: {}", rsp.message.as_deref().unwrap_or("no message"));
                Err(FetchError::NoFixtures(rsp.message))
            }
        }
    }

    async fn get_call(&self, path: &str) -> Result<FixturesRsp, FetchError> {
        let before = Instant::now();
        let url = format!("{}{path}", self.base_url);
        let rsp = self.client
            .get(&url)
            .query(&[("api_token", self.api_token.expose_secret()), ("include", INCLUDES)])
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.without_url().to_string()))?;

        let status = rsp.status();
        let res = match rsp.json::<FixturesRsp>().await {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            Err(e) => Err(FetchError::Parse(e.without_url().to_string())),
        };
        log::info!("[REST] Call {path} {} {:.2?}", status.as_u16(), before.elapsed());
        res
    }
}

use std::process::{Command, Child};

use assert_cmd::prelude::CommandCargoExt;
use efootball_server_rs::models_api::{error::ApiError, matches::Match};
use predicates::{function::FnPredicate, Predicate};
use reqwest::{Response, StatusCode};
use serde_json::json;

pub struct MatchServer {
    port: u16,
    child_process: Option<Child>,
}

impl Drop for MatchServer {
    fn drop(&mut self) {
        if let Some(child) = self.child_process.as_mut() {
            child.kill().expect("Should kill");
        }
    }
}

impl MatchServer {
    pub fn new(port: u16) -> MatchServer {
        MatchServer { port, child_process: None }
    }

    pub fn start(&mut self, path: &str, external_url: &str, api_token: &str, poll_interval_s: u64) {
        let config = json!({
            "port": self.port,
            "sportmonks_url": external_url,
            "api_token": api_token,
            "poll_interval_s": poll_interval_s,
            "request_timeout_s": 5,
            "static_dir": format!("{path}/dist"),
        });

        let config_path = format!("{path}/config.json");
        std::fs::write(config_path.clone(), config.to_string()).unwrap();
        let child_process = Command::cargo_bin("efootball-server-rs")
            .unwrap()
            .env("CONFIG_PATH", config_path)
            .env_remove("SPORTMONKS_API_TOKEN")
            .env_remove("PORT")
            .spawn()
            .expect("should start");

        self.child_process = Some(child_process);
    }

    pub async fn get_matches(&self, filter: Option<&str>) -> Result<Response, Box<dyn std::error::Error>> {
        let url = match filter {
            Some(filter) => format!("http://localhost:{}/api/matches?filter={filter}", self.port),
            None => format!("http://localhost:{}/api/matches", self.port),
        };
        Ok(reqwest::get(url).await?)
    }

    pub async fn get_api_matches(&self, filter: Option<&str>) -> Result<Vec<Match>, Box<dyn std::error::Error>> {
        Ok(self.get_matches(filter).await?.json().await?)
    }

    pub async fn get_api_error(&self) -> Result<(StatusCode, ApiError), Box<dyn std::error::Error>> {
        let rsp = self.get_matches(None).await?;
        let status = rsp.status();
        Ok((status, rsp.json().await?))
    }

    pub async fn retry_until_status(&self, expected_status: StatusCode, retry_ms: u64) -> StatusCode {
        let predicate = predicates::function::function(move |e: &StatusCode| *e == expected_status);
        self.retry_until(predicate, retry_ms).await
    }

    pub async fn retry_until<F>(&self, predicate: FnPredicate<F, StatusCode>, retry_ms: u64) -> StatusCode
    where
        F: Fn(&StatusCode) -> bool,
    {
        let mut nr_loops = 0;
        loop {
            if let Ok(rsp) = self.get_matches(None).await {
                if predicate.eval(&rsp.status()) {
                    return rsp.status();
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(retry_ms)).await;
            nr_loops += 1;
            if nr_loops > 150 {
                panic!("retry failed");
            }
        }
    }
}

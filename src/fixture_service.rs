use std::time::Instant;

use serde_json::Value;
use tracing::log;

use crate::match_service::SafeMatchService;
use crate::models_api::matches::Match;
use crate::models_external::fixture::Fixture;
use crate::rest_client::{FetchError, RestClient};

pub struct FixtureService {
    rest_client: RestClient,
}

impl FixtureService {
    pub fn new(rest_client: RestClient) -> FixtureService {
        FixtureService { rest_client }
    }

    /// One per upstream fixture, in upstream order.
    pub fn normalize(fixtures: Vec<Value>) -> Vec<Match> {
        let before = Instant::now();
        let matches: Vec<Match> = fixtures.into_iter()
            .enumerate()
            .map(|(index, e)| Fixture::from_value(e).into_mapped_match(index))
            .inspect(|e| log::debug!("[FIXTURES] {e}"))
            .collect();
        log::info!("[FIXTURES] Normalized {} fixtures {:.2?}", matches.len(), before.elapsed());
        matches
    }

    pub async fn fetch_today(&self) -> Result<Vec<Match>, FetchError> {
        let fixtures = self.rest_client.get_fixtures_today().await?;
        Ok(FixtureService::normalize(fixtures))
    }

    /// Fetch cycle: claims a sequence number before the request goes out so a
    /// slower, older cycle can never overwrite a newer one.
    pub async fn update(&self, match_service: &SafeMatchService) -> bool {
        let seq = match_service.write().await.issue();
        log::info!("[POLL] Start cycle {seq}");
        let outcome = self.fetch_today().await;
        match_service.write().await.apply(seq, outcome)
    }
}

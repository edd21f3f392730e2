use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::log;

use crate::models_api::matches::Match;
use crate::rest_client::FetchError;

pub type MatchBatch = Arc<Vec<Match>>;

/// Latest outcome of the fetch cycle. Cycles are numbered when they start and
/// only the most recently started one may publish its outcome.
pub struct MatchService {
    issued_seq: u64,
    applied_seq: u64,
    latest: Option<Result<MatchBatch, FetchError>>,
}
pub type SafeMatchService = Arc<RwLock<MatchService>>;

impl MatchService {
    pub fn new() -> SafeMatchService {
        Arc::new(RwLock::new(MatchService {
            issued_seq: 0,
            applied_seq: 0,
            latest: None,
        }))
    }

    pub fn issue(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Returns false when a newer cycle has been started since `seq`.
    pub fn apply(&mut self, seq: u64, outcome: Result<Vec<Match>, FetchError>) -> bool {
        if seq != self.issued_seq {
            log::info!("[MATCHES] Discard cycle {seq}, latest is {}", self.issued_seq);
            return false;
        }
        match &outcome {
            Ok(matches) => log::info!("[MATCHES] Cycle {seq} updated to {} matches", matches.len()),
            Err(e) => log::error!("[MATCHES] Cycle {seq} failed: {e}"),
        }
        self.applied_seq = seq;
        self.latest = Some(outcome.map(Arc::new));
        true
    }

    /// `None` until the first cycle has been applied.
    pub fn read(&self) -> Option<Result<MatchBatch, FetchError>> {
        self.latest.clone()
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}

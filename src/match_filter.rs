use std::str::FromStr;

use crate::models::ParseStringError;
use crate::models_api::filter::ApiFilter;
use crate::models_api::matches::{Match, MatchStatus};

/// Named league tokens and the country each one selects.
const COUNTRY_FILTERS: [(&str, &str); 5] = [
    ("premier", "ENGLAND"),
    ("spain", "SPAIN"),
    ("italy", "ITALY"),
    ("germany", "GERMANY"),
    ("france", "FRANCE"),
];

/// Display order of countries, lower first.
const LEAGUE_PRIORITY: [(&str, u8); 5] = [
    ("ENGLAND", 0),
    ("SPAIN", 1),
    ("ITALY", 2),
    ("GERMANY", 3),
    ("FRANCE", 4),
];

/// Filter bar, in display order.
const FILTER_LABELS: [(&str, &str); 8] = [
    ("all", "All Matches"),
    ("premier", "Premier League"),
    ("spain", "Copa Del Rey"),
    ("italy", "Serie A"),
    ("germany", "Bundesliga"),
    ("france", "Ligue 1"),
    ("live", "Live Now"),
    ("finished", "Finished Matches"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFilter {
    All,
    Country(&'static str),
    Live,
    Finished,
}

impl FromStr for MatchFilter {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MatchFilter::All),
            "live" => Ok(MatchFilter::Live),
            "finished" => Ok(MatchFilter::Finished),
            token => COUNTRY_FILTERS.iter()
                .find(|(e, _)| *e == token)
                .map(|(_, country)| MatchFilter::Country(*country))
                .ok_or(ParseStringError),
        }
    }
}

pub fn league_priority(country: &str) -> u8 {
    LEAGUE_PRIORITY.iter()
        .find(|(e, _)| *e == country)
        .map(|(_, rank)| *rank)
        .unwrap_or_else(unlisted_priority)
}

fn unlisted_priority() -> u8 {
    LEAGUE_PRIORITY.iter().map(|(_, rank)| *rank).max().map(|e| e + 1).unwrap_or(0)
}

pub fn get_filters() -> Vec<ApiFilter> {
    FILTER_LABELS.iter()
        .map(|(id, label)| ApiFilter { id: id.to_string(), label: label.to_string() })
        .collect()
}

impl MatchFilter {
    /// Unrecognized tokens behave like `all`.
    pub fn from_token(token: &str) -> MatchFilter {
        token.parse().unwrap_or(MatchFilter::All)
    }

    pub fn keep(&self, m: &Match) -> bool {
        let finished = m.status == MatchStatus::Finished;
        match self {
            MatchFilter::Finished => finished,
            MatchFilter::All => !finished,
            MatchFilter::Live => m.status == MatchStatus::Live,
            MatchFilter::Country(country) => !finished && m.country == *country,
        }
    }

    /// Kept matches ordered by league priority. `sort_by_key` is stable, so
    /// matches of equal priority keep their input order.
    pub fn apply(&self, matches: &[Match]) -> Vec<Match> {
        let mut result: Vec<Match> = matches.iter()
            .filter(|e| self.keep(e))
            .cloned()
            .collect();
        result.sort_by_key(|e| league_priority(&e.country));
        result
    }
}

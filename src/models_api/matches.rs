use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ParseStringError;

const LIVE_STATES: [&str; 7] = [
    "INPLAY_1ST_HALF",
    "INPLAY_2ND_HALF",
    "HT",
    "INPLAY_ET",
    "INPLAY_ET_2ND_HALF",
    "PEN_BREAK",
    "INPLAY_PENALTIES",
];

const FINISHED_STATES: [&str; 7] = [
    "FT",
    "AET",
    "FT_PEN",
    "CANCELLED",
    "AWARDED",
    "WALKOVER",
    "ABANDONED",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    /// Collapses an upstream state code into one of the three statuses.
    /// Codes outside both tables, including an absent one, are `Upcoming`.
    pub fn from_state(code: Option<&str>) -> MatchStatus {
        match code {
            Some(code) if LIVE_STATES.contains(&code) => MatchStatus::Live,
            Some(code) if FINISHED_STATES.contains(&code) => MatchStatus::Finished,
            _ => MatchStatus::Upcoming,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(MatchStatus::Upcoming),
            "live" => Ok(MatchStatus::Live),
            "finished" => Ok(MatchStatus::Finished),
            _ => Err(ParseStringError)
        }
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    pub logo: String,
}

impl Team {
    pub fn tbd() -> Team {
        Team { name: "TBD".to_string(), logo: String::new() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub home_team: Team,
    pub away_team: Team,
    pub start_time: String,
    pub status: MatchStatus,
    pub score: Score,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_minute: Option<u16>,

    pub league: String,
    pub league_id: i64,
    pub country: String,
}

impl Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} - {} {}:{} {}",
            self.id,
            self.home_team.name,
            self.away_team.name,
            self.score.home,
            self.score.away,
            self.status,
        )
    }
}

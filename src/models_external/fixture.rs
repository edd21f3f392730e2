use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::StringOrNum;
use crate::models_api::matches::{Match, MatchStatus, Score, Team};

const HOME: &str = "home";
const AWAY: &str = "away";
const CURRENT_SCORE: &str = "CURRENT";

/// A field with an unexpected shape decodes as absent instead of failing the fixture.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps the entries that decode, skips the rest.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let result = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries.into_iter()
            .filter_map(|e| serde_json::from_value(e).ok())
            .collect(),
        _ => vec![],
    };
    Ok(result)
}

/// Body of `GET /fixtures/date/{date}`. A missing `data` is how the provider reports failure.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FixturesRsp {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Fixture {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<StringOrNum>,
    #[serde(default, deserialize_with = "lenient")]
    pub league_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub starting_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub starting_at_timestamp: Option<i64>,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub participants: Vec<Participant>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub scores: Vec<ScoreEntry>,

    #[serde(default, deserialize_with = "lenient")]
    pub league: Option<FixtureLeague>,
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<FixtureState>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Participant {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub meta: Option<ParticipantMeta>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ParticipantMeta {
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScoreEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<ScoreValue>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScoreValue {
    #[serde(default, deserialize_with = "lenient")]
    pub goals: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    pub participant: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FixtureLeague {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<FixtureCountry>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FixtureCountry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FixtureState {
    #[serde(default, deserialize_with = "lenient")]
    pub developer_name: Option<String>,
}

impl Participant {
    fn is_at(&self, location: &str) -> bool {
        self.meta.as_ref().and_then(|e| e.location.as_deref()) == Some(location)
    }
}

impl ScoreEntry {
    fn is_current_for(&self, location: &str) -> bool {
        self.description.as_deref() == Some(CURRENT_SCORE)
            && self.score.as_ref().and_then(|e| e.participant.as_deref()) == Some(location)
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|e| e.as_str()).filter(|e| !e.is_empty())
}

impl Fixture {
    /// Never fails: anything that is not an object becomes an all-default fixture.
    pub fn from_value(value: Value) -> Fixture {
        if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            Fixture::default()
        }
    }

    /// `index` is the position within the batch, used as id when upstream has none.
    pub fn into_mapped_match(self, index: usize) -> Match {
        let league = self.league.as_ref();
        let country = league
            .and_then(|e| e.country.as_ref())
            .and_then(|e| non_empty(e.name.as_ref()))
            .unwrap_or_default();

        Match {
            id: self.id.as_ref()
                .map(|e| e.to_str())
                .unwrap_or_else(|| format!("fixture-{index}")),
            home_team: self.team_at(HOME),
            away_team: self.team_at(AWAY),
            start_time: self.start_time(),
            status: MatchStatus::from_state(self.state_code()),
            score: Score {
                home: self.goals_for(HOME),
                away: self.goals_for(AWAY),
            },
            live_minute: None,
            league: league
                .and_then(|e| non_empty(e.name.as_ref()))
                .unwrap_or("UNKNOWN")
                .to_uppercase(),
            league_id: self.league_id
                .or_else(|| league.and_then(|e| e.id))
                .unwrap_or(0),
            country: country.to_uppercase(),
        }
    }

    fn state_code(&self) -> Option<&str> {
        self.state.as_ref().and_then(|e| e.developer_name.as_deref())
    }

    fn team_at(&self, location: &str) -> Team {
        self.participants.iter()
            .find(|e| e.is_at(location))
            .map(|e| Team {
                name: non_empty(e.name.as_ref()).unwrap_or("TBD").to_uppercase(),
                logo: e.image_path.clone().unwrap_or_default(),
            })
            .unwrap_or_else(Team::tbd)
    }

    fn goals_for(&self, location: &str) -> u16 {
        self.scores.iter()
            .find(|e| e.is_current_for(location))
            .and_then(|e| e.score.as_ref())
            .and_then(|e| e.goals)
            .unwrap_or(0)
    }

    fn start_time(&self) -> String {
        if let Some(time) = self.starting_at_timestamp.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)) {
            return time.to_rfc3339_opts(SecondsFormat::Secs, true);
        }
        match &self.starting_at {
            Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|e| e.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_else(|_| raw.clone()),
            None => String::new(),
        }
    }
}

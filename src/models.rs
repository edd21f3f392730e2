use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq)]
pub struct ParseStringError;

impl std::fmt::Display for ParseStringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized value")
    }
}

/// Upstream ids arrive as numbers, occasionally as strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Number(i64),
}

impl StringOrNum {
    pub fn to_str(&self) -> String {
        match self {
            StringOrNum::String(str) => str.to_owned(),
            StringOrNum::Number(n) => n.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: &str) -> ApiError {
        ApiError { error: error.to_string() }
    }
}

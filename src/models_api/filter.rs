use serde::{Deserialize, Serialize};

/// Entry of the dashboard filter bar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiFilter {
    pub id: String,
    pub label: String,
}

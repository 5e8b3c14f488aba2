use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// TMDB person record; fields the service does not read are passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: u64,
    pub name: String,
    pub biography: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a person's filmography (cast or crew)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditEntry {
    pub id: u64,
    #[serde(default)]
    pub popularity: f64,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedCredits {
    #[serde(default)]
    pub cast: Vec<CreditEntry>,
    #[serde(default)]
    pub crew: Vec<CreditEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonResponse {
    pub person: PersonDetails,
    pub credits: CombinedCredits,
}

//! HTTP DTOs for program endpoints.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramQuery {
    pub program_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    /// Generated when absent.
    pub program_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramRequest {
    pub program_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub extra: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProgramQuery {
    pub program_id: String,
}

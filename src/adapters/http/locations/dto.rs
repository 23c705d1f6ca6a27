//! HTTP DTOs for location endpoints.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQuery {
    pub location_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    /// Generated when absent.
    pub location_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub check_in_radius_meters: Option<f64>,
    #[serde(default)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub location_id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub check_in_radius_meters: Option<f64>,
    pub extra: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLocationQuery {
    pub location_id: String,
}

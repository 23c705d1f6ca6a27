//! Location entity - a physical place sessions happen at.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::{DomainError, LocationId, TenantId, Timestamp};
use crate::domain::geo::Coordinates;

/// Radius applied when a location does not configure its own.
pub const DEFAULT_CHECK_IN_RADIUS_METERS: f64 = 100.0;

/// A physical place with optional coordinates used by GPS check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub tenant_id: TenantId,
    pub location_id: LocationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Stored coordinates; absent means GPS check-in is not enforced here.
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,
    #[serde(default = "default_radius")]
    pub check_in_radius_meters: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Extension envelope for caller-defined fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, JsonValue>,
}

fn default_radius() -> f64 {
    DEFAULT_CHECK_IN_RADIUS_METERS
}

impl Location {
    pub fn new(
        tenant_id: TenantId,
        location_id: LocationId,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::bad_input("name", "location name cannot be empty"));
        }
        let now = Timestamp::now();
        Ok(Self {
            tenant_id,
            location_id,
            name,
            address: None,
            coordinates: None,
            check_in_radius_meters: DEFAULT_CHECK_IN_RADIUS_METERS,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        })
    }

    /// Validates the mutable fields after construction or patching.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.check_in_radius_meters.is_finite() || self.check_in_radius_meters <= 0.0 {
            return Err(DomainError::bad_input(
                "checkInRadiusMeters",
                "check-in radius must be positive",
            ));
        }
        if let Some(coordinates) = &self.coordinates {
            Coordinates::new(coordinates.lat, coordinates.lng)?;
        }
        Ok(())
    }
}

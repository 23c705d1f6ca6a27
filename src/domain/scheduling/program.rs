//! Program entity - what is being scheduled.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::{DomainError, ProgramId, TenantId, Timestamp};

/// Metadata for a bookable offering (a class, a treatment, a service).
///
/// Schedules reference programs by id; deleting a referenced program is
/// allowed and leaves the reference dangling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub tenant_id: TenantId,
    pub program_id: ProgramId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Extension envelope for caller-defined fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, JsonValue>,
}

impl Program {
    pub fn new(
        tenant_id: TenantId,
        program_id: ProgramId,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::bad_input("name", "program name cannot be empty"));
        }
        let now = Timestamp::now();
        Ok(Self {
            tenant_id,
            program_id,
            name,
            description: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        })
    }
}

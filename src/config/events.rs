//! Event bus configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Event bus naming.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Bus the workers consume from and publish to.
    #[serde(default = "default_bus_name")]
    pub bus_name: String,

    /// `source` stamped on outbound envelopes.
    #[serde(default = "default_source")]
    pub source: String,
}

impl EventsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bus_name.trim().is_empty() || self.source.trim().is_empty() {
            return Err(ValidationError::EmptyBusName);
        }
        Ok(())
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            bus_name: default_bus_name(),
            source: default_source(),
        }
    }
}

fn default_bus_name() -> String {
    "bookwell-events".to_string()
}

fn default_source() -> String {
    "bookwell.scheduling".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EventsConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_bus_name_is_rejected() {
        let config = EventsConfig {
            bus_name: "".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyBusName));
    }
}

//! Check-in policy configuration.

use serde::Deserialize;

use crate::domain::attendance::CheckInWindow;

use super::error::ValidationError;

/// Attendance window and GPS defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInConfig {
    /// Minutes before session start that check-in opens.
    #[serde(default = "default_window")]
    pub window_before_minutes: i64,

    /// Minutes after session start that check-in closes.
    #[serde(default = "default_window")]
    pub window_after_minutes: i64,

    /// Radius applied when a location does not configure one.
    #[serde(default = "default_radius")]
    pub default_radius_meters: f64,
}

impl CheckInConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_before_minutes < 0 || self.window_after_minutes < 0 {
            return Err(ValidationError::NegativeWindow);
        }
        if !self.default_radius_meters.is_finite() || self.default_radius_meters <= 0.0 {
            return Err(ValidationError::InvalidRadius);
        }
        Ok(())
    }

    /// The window in domain terms.
    pub fn window(&self) -> CheckInWindow {
        CheckInWindow {
            minutes_before: self.window_before_minutes,
            minutes_after: self.window_after_minutes,
        }
    }
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            window_before_minutes: default_window(),
            window_after_minutes: default_window(),
            default_radius_meters: default_radius(),
        }
    }
}

fn default_window() -> i64 {
    15
}

fn default_radius() -> f64 {
    100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let config = CheckInConfig::default();
        assert!(config.validate().is_ok());

        let window = config.window();
        assert_eq!(window.minutes_before, 15);
        assert_eq!(window.minutes_after, 15);
        assert_eq!(config.default_radius_meters, 100.0);
    }

    #[test]
    fn negative_window_is_rejected() {
        let config = CheckInConfig {
            window_before_minutes: -1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::NegativeWindow));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let config = CheckInConfig {
            default_radius_meters: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRadius));
    }
}

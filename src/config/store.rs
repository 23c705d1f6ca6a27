//! Store configuration - per-process table names.

use serde::Deserialize;

use super::error::ValidationError;

/// Names of the seven tenant-partitioned tables.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_programs_table")]
    pub programs_table: String,
    #[serde(default = "default_locations_table")]
    pub locations_table: String,
    #[serde(default = "default_schedules_table")]
    pub schedules_table: String,
    #[serde(default = "default_exceptions_table")]
    pub exceptions_table: String,
    #[serde(default = "default_bookings_table")]
    pub bookings_table: String,
    #[serde(default = "default_summaries_table")]
    pub summaries_table: String,
    #[serde(default = "default_attendance_table")]
    pub attendance_table: String,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("programs_table", &self.programs_table),
            ("locations_table", &self.locations_table),
            ("schedules_table", &self.schedules_table),
            ("exceptions_table", &self.exceptions_table),
            ("bookings_table", &self.bookings_table),
            ("summaries_table", &self.summaries_table),
            ("attendance_table", &self.attendance_table),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyTableName(name));
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            programs_table: default_programs_table(),
            locations_table: default_locations_table(),
            schedules_table: default_schedules_table(),
            exceptions_table: default_exceptions_table(),
            bookings_table: default_bookings_table(),
            summaries_table: default_summaries_table(),
            attendance_table: default_attendance_table(),
        }
    }
}

fn default_programs_table() -> String {
    "bookwell-programs".to_string()
}

fn default_locations_table() -> String {
    "bookwell-locations".to_string()
}

fn default_schedules_table() -> String {
    "bookwell-schedules".to_string()
}

fn default_exceptions_table() -> String {
    "bookwell-schedule-exceptions".to_string()
}

fn default_bookings_table() -> String {
    "bookwell-bookings".to_string()
}

fn default_summaries_table() -> String {
    "bookwell-session-summaries".to_string()
}

fn default_attendance_table() -> String {
    "bookwell-attendance".to_string()
}

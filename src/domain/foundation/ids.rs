//! Strongly-typed identifier value objects.
//!
//! All reference ids are opaque strings supplied by callers. They are
//! validated to be non-empty and free of `#`, which is reserved as the
//! composite-key separator in the persisted layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::DomainError;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $field:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id, rejecting empty values and the `#` separator.
            pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(DomainError::bad_input($field, concat!($field, " cannot be empty")));
                }
                if id.contains('#') {
                    return Err(DomainError::bad_input(
                        $field,
                        concat!($field, " cannot contain '#'"),
                    ));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Tenant scope for every entity and operation.
    TenantId,
    "tenantId"
);
string_id!(
    /// Identifier of a program (what is being scheduled).
    ProgramId,
    "programId"
);
string_id!(
    /// Identifier of a physical location.
    LocationId,
    "locationId"
);
string_id!(
    /// Identifier of a schedule (time pattern).
    ScheduleId,
    "scheduleId"
);
string_id!(
    /// The person or entity holding a booking (member, lead, patient, ...).
    SubjectId,
    "subjectId"
);
string_id!(
    /// A provider or resource assigned to a session.
    HostId,
    "hostId"
);

/// Identifier of a booking. Generated by the system at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Generates a new random booking id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a BookingId from an existing string.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::bad_input("bookingId", "bookingId cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a virtual session: a schedule occurrence on a local date.
///
/// Sessions are never stored; the id addresses one deterministically as
/// `"{scheduleId}#{YYYY-MM-DD}"` where the date is the occurrence date in
/// the schedule's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId {
    schedule_id: ScheduleId,
    date: NaiveDate,
}

impl SessionId {
    pub fn new(schedule_id: ScheduleId, date: NaiveDate) -> Self {
        Self { schedule_id, date }
    }

    pub fn schedule_id(&self) -> &ScheduleId {
        &self.schedule_id
    }

    /// The occurrence date in the schedule's local timezone.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.schedule_id, self.date.format("%Y-%m-%d"))
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (schedule_part, date_part) = s.split_once('#').ok_or_else(|| {
            DomainError::bad_input(
                "sessionId",
                "sessionId must be of the form '{scheduleId}#{YYYY-MM-DD}'",
            )
        })?;
        let schedule_id = ScheduleId::new(schedule_part)?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
            DomainError::bad_input("sessionId", format!("invalid session date '{}'", date_part))
        })?;
        Ok(Self { schedule_id, date })
    }
}

impl Serialize for SessionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: DomainError| serde::de::Error::custom(e.message))
    }
}

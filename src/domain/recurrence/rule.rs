//! Parsing and validation of the supported RFC 5545 profile.
//!
//! Supported: `FREQ` of DAILY/WEEKLY/MONTHLY, `INTERVAL`, `BYDAY` (required
//! for WEEKLY), simple `BYMONTHDAY` for MONTHLY, `UNTIL`, `COUNT`. Anything
//! else is rejected up front so schedules never persist a rule the expander
//! cannot honor.

use chrono::{DateTime, NaiveDateTime, Weekday};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Expansion frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// A validated recurrence rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    /// Period step; defaults to 1.
    pub interval: u32,
    /// Weekdays for WEEKLY rules, in rule order.
    pub by_day: Vec<Weekday>,
    /// Month days (1-31) for MONTHLY rules; empty means the dtstart day.
    pub by_month_day: Vec<u32>,
    /// Inclusive upper bound, compared in the naive representation.
    pub until: Option<NaiveDateTime>,
    /// Total number of occurrences counted from dtstart.
    pub count: Option<u32>,
}

impl RecurrenceRule {
    /// Parses a rule string, with or without the `RRULE:` prefix.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let body = input.strip_prefix("RRULE:").unwrap_or(input).trim();
        if body.is_empty() {
            return Err(unsupported("empty rule"));
        }

        let mut freq = None;
        let mut interval: u32 = 1;
        let mut by_day = Vec::new();
        let mut by_month_day = Vec::new();
        let mut until = None;
        let mut count = None;

        for part in body.split(';') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                unsupported(format!("malformed rule part '{}'", part))
            })?;

            match key.trim().to_ascii_uppercase().as_str() {
                "FREQ" => {
                    freq = Some(match value.to_ascii_uppercase().as_str() {
                        "DAILY" => Frequency::Daily,
                        "WEEKLY" => Frequency::Weekly,
                        "MONTHLY" => Frequency::Monthly,
                        other => return Err(unsupported(format!("FREQ={} is not supported", other))),
                    });
                }
                "INTERVAL" => {
                    interval = value.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(|| {
                        unsupported(format!("INTERVAL must be a positive integer, got '{}'", value))
                    })?;
                }
                "BYDAY" => {
                    for token in value.split(',') {
                        by_day.push(parse_weekday(token)?);
                    }
                }
                "BYMONTHDAY" => {
                    for token in value.split(',') {
                        let day = token.parse::<i32>().map_err(|_| {
                            unsupported(format!("BYMONTHDAY entry '{}' is not an integer", token))
                        })?;
                        if !(1..=31).contains(&day) {
                            return Err(unsupported(format!(
                                "BYMONTHDAY={} is not supported; only simple positive month days",
                                day
                            )));
                        }
                        by_month_day.push(day as u32);
                    }
                }
                "UNTIL" => until = Some(parse_until(value)?),
                "COUNT" => {
                    count = Some(value.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(|| {
                        unsupported(format!("COUNT must be a positive integer, got '{}'", value))
                    })?);
                }
                other => {
                    return Err(unsupported(format!("rule field {} is not supported", other)));
                }
            }
        }

        let freq = freq.ok_or_else(|| unsupported("rule is missing FREQ"))?;

        let rule = Self {
            freq,
            interval,
            by_day,
            by_month_day,
            until,
            count,
        };
        rule.validate()?;
        Ok(rule)
    }

    fn validate(&self) -> Result<(), DomainError> {
        match self.freq {
            Frequency::Weekly => {
                if self.by_day.is_empty() {
                    return Err(unsupported("WEEKLY rules require BYDAY"));
                }
            }
            Frequency::Daily | Frequency::Monthly => {
                if !self.by_day.is_empty() {
                    return Err(unsupported("BYDAY is only supported with FREQ=WEEKLY"));
                }
            }
        }
        if !self.by_month_day.is_empty() && self.freq != Frequency::Monthly {
            return Err(unsupported("BYMONTHDAY is only supported with FREQ=MONTHLY"));
        }
        if self.until.is_some() && self.count.is_some() {
            return Err(unsupported("UNTIL and COUNT cannot both be present"));
        }
        Ok(())
    }
}

fn unsupported(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::UnsupportedRule, message)
}

fn parse_weekday(token: &str) -> Result<Weekday, DomainError> {
    match token.trim().to_ascii_uppercase().as_str() {
        "MO" => Ok(Weekday::Mon),
        "TU" => Ok(Weekday::Tue),
        "WE" => Ok(Weekday::Wed),
        "TH" => Ok(Weekday::Thu),
        "FR" => Ok(Weekday::Fri),
        "SA" => Ok(Weekday::Sat),
        "SU" => Ok(Weekday::Sun),
        other => Err(unsupported(format!(
            "BYDAY entry '{}' is not supported; only plain two-letter weekdays",
            other
        ))),
    }
}

/// UNTIL is a UTC instant; both the RFC 5545 basic form (`YYYYMMDDTHHMMSSZ`)
/// and RFC 3339 are accepted. The value is carried into expansion as the
/// instant's UTC wall clock, matching the naive working representation.
fn parse_until(value: &str) -> Result<NaiveDateTime, DomainError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%SZ") {
        return Ok(naive);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    Err(unsupported(format!("UNTIL value '{}' is not a UTC instant", value)))
}

//! Rule expansion over a naive datetime window.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use super::rule::{Frequency, RecurrenceRule};

/// Upper bound on period iterations; query windows are bounded, so any rule
/// that runs this long is degenerate.
const MAX_PERIODS: u32 = 5000;

/// Expands `rule` from `dtstart` into the occurrences falling within
/// `[range_start, range_end]`, both endpoints inclusive.
///
/// All values are naive: the caller places the schedule's local wall clock
/// into the naive representation before calling and converts the results
/// back afterwards. `COUNT` is consumed by every occurrence from `dtstart`
/// onward, including those before `range_start`.
pub fn expand(
    rule: &RecurrenceRule,
    dtstart: NaiveDateTime,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    if range_end < range_start {
        return out;
    }

    let mut counted: u32 = 0;
    'periods: for period in 0..MAX_PERIODS {
        for candidate in candidates_for_period(rule, dtstart, period) {
            // Candidates in the first period may precede dtstart (e.g. a
            // Monday in dtstart's week when dtstart is a Wednesday); those
            // are not occurrences at all.
            if candidate < dtstart {
                continue;
            }
            if let Some(until) = rule.until {
                if candidate > until {
                    break 'periods;
                }
            }
            if let Some(count) = rule.count {
                if counted >= count {
                    break 'periods;
                }
            }
            counted += 1;
            if candidate > range_end {
                break 'periods;
            }
            if candidate >= range_start {
                out.push(candidate);
            }
        }
    }
    out
}

/// The ascending candidate occurrences of one period step.
fn candidates_for_period(
    rule: &RecurrenceRule,
    dtstart: NaiveDateTime,
    period: u32,
) -> Vec<NaiveDateTime> {
    let step = period * rule.interval;
    let time = dtstart.time();

    match rule.freq {
        Frequency::Daily => {
            vec![dtstart + Duration::days(i64::from(step))]
        }
        Frequency::Weekly => {
            let week_anchor = start_of_week(dtstart.date()) + Duration::weeks(i64::from(step));
            let mut days: Vec<Weekday> = rule.by_day.clone();
            days.sort_by_key(|d| d.num_days_from_monday());
            days.dedup();
            days.into_iter()
                .map(|d| {
                    (week_anchor + Duration::days(i64::from(d.num_days_from_monday()))).and_time(time)
                })
                .collect()
        }
        Frequency::Monthly => {
            let months0 = dtstart.year() * 12 + dtstart.month0() as i32 + step as i32;
            let year = months0.div_euclid(12);
            let month = months0.rem_euclid(12) as u32 + 1;

            let mut days: Vec<u32> = if rule.by_month_day.is_empty() {
                vec![dtstart.day()]
            } else {
                rule.by_month_day.clone()
            };
            days.sort_unstable();
            days.dedup();
            days.into_iter()
                // Days that do not exist in this month (e.g. 31 in April) are skipped.
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .map(|date| date.and_time(time))
                .collect()
        }
    }
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn rule(s: &str) -> RecurrenceRule {
        RecurrenceRule::parse(s).unwrap()
    }

    #[test]
    fn weekly_mo_we_fr_produces_three_occurrences_in_week() {
        let r = rule("RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR");
        let occurrences = expand(
            &r,
            at(2025, 1, 6, 7, 0),
            at(2025, 1, 6, 0, 0),
            at(2025, 1, 10, 23, 59),
        );

        assert_eq!(
            occurrences,
            vec![at(2025, 1, 6, 7, 0), at(2025, 1, 8, 7, 0), at(2025, 1, 10, 7, 0)]
        );
    }

    #[test]
    fn weekly_skips_days_before_dtstart_in_first_week() {
        // dtstart on Wednesday; the Monday of that week is not an occurrence.
        let r = rule("RRULE:FREQ=WEEKLY;BYDAY=MO,WE");
        let occurrences = expand(
            &r,
            at(2025, 1, 8, 7, 0),
            at(2025, 1, 6, 0, 0),
            at(2025, 1, 14, 0, 0),
        );

        assert_eq!(occurrences, vec![at(2025, 1, 8, 7, 0), at(2025, 1, 13, 7, 0)]);
    }

    #[test]
    fn weekly_interval_two_skips_alternate_weeks() {
        let r = rule("RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO");
        let occurrences = expand(
            &r,
            at(2025, 1, 6, 7, 0),
            at(2025, 1, 6, 0, 0),
            at(2025, 2, 4, 0, 0),
        );

        assert_eq!(
            occurrences,
            vec![at(2025, 1, 6, 7, 0), at(2025, 1, 20, 7, 0), at(2025, 2, 3, 7, 0)]
        );
    }

    #[test]
    fn daily_is_blind_to_dst_transitions() {
        // Expansion is naive; the spring-forward Sunday still yields a 07:00
        // wall-clock occurrence.
        let r = rule("RRULE:FREQ=DAILY");
        let occurrences = expand(
            &r,
            at(2025, 3, 8, 7, 0),
            at(2025, 3, 8, 0, 0),
            at(2025, 3, 9, 23, 0),
        );

        assert_eq!(occurrences, vec![at(2025, 3, 8, 7, 0), at(2025, 3, 9, 7, 0)]);
    }

    #[test]
    fn daily_interval_three() {
        let r = rule("RRULE:FREQ=DAILY;INTERVAL=3");
        let occurrences = expand(
            &r,
            at(2025, 1, 1, 9, 0),
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 10, 0, 0),
        );

        assert_eq!(
            occurrences,
            vec![at(2025, 1, 1, 9, 0), at(2025, 1, 4, 9, 0), at(2025, 1, 7, 9, 0)]
        );
    }

    #[test]
    fn count_is_consumed_by_occurrences_before_the_range() {
        // Five daily occurrences from Jan 1; querying Jan 4 onward sees only
        // the remaining two.
        let r = rule("RRULE:FREQ=DAILY;COUNT=5");
        let occurrences = expand(
            &r,
            at(2025, 1, 1, 9, 0),
            at(2025, 1, 4, 0, 0),
            at(2025, 1, 31, 0, 0),
        );

        assert_eq!(occurrences, vec![at(2025, 1, 4, 9, 0), at(2025, 1, 5, 9, 0)]);
    }

    #[test]
    fn until_is_inclusive() {
        let r = rule("RRULE:FREQ=DAILY;UNTIL=20250103T090000Z");
        let occurrences = expand(
            &r,
            at(2025, 1, 1, 9, 0),
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 31, 0, 0),
        );

        assert_eq!(
            occurrences,
            vec![at(2025, 1, 1, 9, 0), at(2025, 1, 2, 9, 0), at(2025, 1, 3, 9, 0)]
        );
    }

    #[test]
    fn range_endpoints_are_inclusive() {
        let r = rule("RRULE:FREQ=DAILY");
        let occurrences = expand(
            &r,
            at(2025, 1, 1, 9, 0),
            at(2025, 1, 2, 9, 0),
            at(2025, 1, 3, 9, 0),
        );

        assert_eq!(occurrences, vec![at(2025, 1, 2, 9, 0), at(2025, 1, 3, 9, 0)]);
    }

    #[test]
    fn monthly_defaults_to_dtstart_day() {
        let r = rule("RRULE:FREQ=MONTHLY");
        let occurrences = expand(
            &r,
            at(2025, 1, 15, 18, 0),
            at(2025, 1, 1, 0, 0),
            at(2025, 3, 31, 0, 0),
        );

        assert_eq!(
            occurrences,
            vec![at(2025, 1, 15, 18, 0), at(2025, 2, 15, 18, 0), at(2025, 3, 15, 18, 0)]
        );
    }

    #[test]
    fn monthly_skips_nonexistent_days() {
        // Day 31 does not exist in February or April.
        let r = rule("RRULE:FREQ=MONTHLY;BYMONTHDAY=31");
        let occurrences = expand(
            &r,
            at(2025, 1, 31, 10, 0),
            at(2025, 1, 1, 0, 0),
            at(2025, 5, 31, 23, 0),
        );

        assert_eq!(
            occurrences,
            vec![at(2025, 1, 31, 10, 0), at(2025, 3, 31, 10, 0), at(2025, 5, 31, 10, 0)]
        );
    }

    #[test]
    fn monthly_multiple_days_stay_sorted() {
        let r = rule("RRULE:FREQ=MONTHLY;BYMONTHDAY=1,15");
        let occurrences = expand(
            &r,
            at(2025, 1, 1, 8, 0),
            at(2025, 1, 1, 0, 0),
            at(2025, 2, 28, 0, 0),
        );

        assert_eq!(
            occurrences,
            vec![
                at(2025, 1, 1, 8, 0),
                at(2025, 1, 15, 8, 0),
                at(2025, 2, 1, 8, 0),
                at(2025, 2, 15, 8, 0)
            ]
        );
    }

    #[test]
    fn monthly_skips_days_before_dtstart_in_first_month() {
        let r = rule("RRULE:FREQ=MONTHLY;BYMONTHDAY=1,15");
        let occurrences = expand(
            &r,
            at(2025, 1, 10, 8, 0),
            at(2025, 1, 1, 0, 0),
            at(2025, 2, 10, 0, 0),
        );

        assert_eq!(occurrences, vec![at(2025, 1, 15, 8, 0), at(2025, 2, 1, 8, 0)]);
    }

    #[test]
    fn monthly_spans_year_boundary() {
        let r = rule("RRULE:FREQ=MONTHLY;INTERVAL=2");
        let occurrences = expand(
            &r,
            at(2024, 11, 5, 12, 0),
            at(2024, 11, 1, 0, 0),
            at(2025, 3, 31, 0, 0),
        );

        assert_eq!(
            occurrences,
            vec![at(2024, 11, 5, 12, 0), at(2025, 1, 5, 12, 0), at(2025, 3, 5, 12, 0)]
        );
    }

    #[test]
    fn empty_range_returns_nothing() {
        let r = rule("RRULE:FREQ=DAILY");
        let occurrences = expand(
            &r,
            at(2025, 1, 1, 9, 0),
            at(2025, 1, 5, 0, 0),
            at(2025, 1, 4, 0, 0),
        );
        assert!(occurrences.is_empty());
    }
}

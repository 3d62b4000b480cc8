//! Course-group schedule derivation and weekly time-slot matching.
//!
//! Given a start date, the selected weekdays and a target session count, the
//! end date is `start + ceil(sessions / days) * 7` days. The start date's
//! weekday must be one of the selected days. Session end time is the start
//! time plus a fixed per-session duration.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced while deriving a group schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("at least one weekday must be selected")]
    NoDaysSelected,

    #[error("sessions count must be greater than zero")]
    NoSessions,

    #[error("session duration must be greater than zero")]
    NoDuration,

    #[error("start date must fall on one of the selected weekdays")]
    StartDayNotSelected,

    #[error("unknown weekday code: {0}")]
    UnknownDay(String),
}

/// Weekday of a scheduled session. The academy week starts on Saturday.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleDay {
    Sat,
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl ScheduleDay {
    /// All weekdays in academy week order.
    pub const ALL: [ScheduleDay; 7] = [
        ScheduleDay::Sat,
        ScheduleDay::Sun,
        ScheduleDay::Mon,
        ScheduleDay::Tue,
        ScheduleDay::Wed,
        ScheduleDay::Thu,
        ScheduleDay::Fri,
    ];

    /// Stable lowercase code used in forms and backend payloads.
    pub fn code(self) -> &'static str {
        match self {
            ScheduleDay::Sat => "sat",
            ScheduleDay::Sun => "sun",
            ScheduleDay::Mon => "mon",
            ScheduleDay::Tue => "tue",
            ScheduleDay::Wed => "wed",
            ScheduleDay::Thu => "thu",
            ScheduleDay::Fri => "fri",
        }
    }
}

impl Display for ScheduleDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ScheduleDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sat" => Ok(ScheduleDay::Sat),
            "sun" => Ok(ScheduleDay::Sun),
            "mon" => Ok(ScheduleDay::Mon),
            "tue" => Ok(ScheduleDay::Tue),
            "wed" => Ok(ScheduleDay::Wed),
            "thu" => Ok(ScheduleDay::Thu),
            "fri" => Ok(ScheduleDay::Fri),
            other => Err(ScheduleError::UnknownDay(other.to_string())),
        }
    }
}

impl From<Weekday> for ScheduleDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sat => ScheduleDay::Sat,
            Weekday::Sun => ScheduleDay::Sun,
            Weekday::Mon => ScheduleDay::Mon,
            Weekday::Tue => ScheduleDay::Tue,
            Weekday::Wed => ScheduleDay::Wed,
            Weekday::Thu => ScheduleDay::Thu,
            Weekday::Fri => ScheduleDay::Fri,
        }
    }
}

impl From<ScheduleDay> for Weekday {
    fn from(day: ScheduleDay) -> Self {
        match day {
            ScheduleDay::Sat => Weekday::Sat,
            ScheduleDay::Sun => Weekday::Sun,
            ScheduleDay::Mon => Weekday::Mon,
            ScheduleDay::Tue => Weekday::Tue,
            ScheduleDay::Wed => Weekday::Wed,
            ScheduleDay::Thu => Weekday::Thu,
            ScheduleDay::Fri => Weekday::Fri,
        }
    }
}

/// Deduplicates and sorts selected weekdays into academy week order.
pub fn normalize_days(days: &[ScheduleDay]) -> Vec<ScheduleDay> {
    let mut days: Vec<ScheduleDay> = days.to_vec();
    days.sort_unstable();
    days.dedup();
    days
}

/// Number of calendar weeks needed to deliver `sessions` sessions over
/// `days_per_week` weekly slots.
pub fn weeks_needed(sessions: u32, days_per_week: usize) -> Result<u32, ScheduleError> {
    if sessions == 0 {
        return Err(ScheduleError::NoSessions);
    }
    if days_per_week == 0 {
        return Err(ScheduleError::NoDaysSelected);
    }
    Ok(sessions.div_ceil(days_per_week as u32))
}

/// Derives the group end date from its start date, selected weekdays and
/// session count.
///
/// The start date's weekday must be one of the selected days; otherwise the
/// first session could never take place.
pub fn derive_end_date(
    start_date: NaiveDate,
    days: &[ScheduleDay],
    sessions: u32,
) -> Result<NaiveDate, ScheduleError> {
    let days = normalize_days(days);
    if days.is_empty() {
        return Err(ScheduleError::NoDaysSelected);
    }
    if !days.contains(&ScheduleDay::from(start_date.weekday())) {
        return Err(ScheduleError::StartDayNotSelected);
    }

    let weeks = weeks_needed(sessions, days.len())?;

    Ok(start_date + Duration::days(i64::from(weeks) * 7))
}

/// Computes the session end time from its start time and duration.
///
/// `NaiveTime` addition wraps at midnight, matching sessions that run past it.
pub fn session_end_time(start: NaiveTime, duration_minutes: u32) -> Result<NaiveTime, ScheduleError> {
    if duration_minutes == 0 {
        return Err(ScheduleError::NoDuration);
    }
    Ok(start + Duration::minutes(i64::from(duration_minutes)))
}

/// One weekly slot of a course group: a weekday plus a start time and
/// duration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub day: ScheduleDay,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

impl TimeSlot {
    pub fn end_time(&self) -> NaiveTime {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Two slots collide when they fall on the same weekday and their
    /// `[start, start + duration)` intervals intersect.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        if self.day != other.day {
            return false;
        }
        let a_start = minutes_from_midnight(self.start_time);
        let a_end = a_start + i64::from(self.duration_minutes);
        let b_start = minutes_from_midnight(other.start_time);
        let b_end = b_start + i64::from(other.duration_minutes);

        a_start < b_end && b_start < a_end
    }
}

fn minutes_from_midnight(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// The recurring weekly pattern of a course group, bounded by its start and
/// derived end date.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<ScheduleDay>,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

impl GroupSchedule {
    /// Builds a schedule, deriving the end date per the derivation rules.
    pub fn derive(
        start_date: NaiveDate,
        days: &[ScheduleDay],
        start_time: NaiveTime,
        duration_minutes: u32,
        sessions: u32,
    ) -> Result<Self, ScheduleError> {
        if duration_minutes == 0 {
            return Err(ScheduleError::NoDuration);
        }
        let days = normalize_days(days);
        let end_date = derive_end_date(start_date, &days, sessions)?;

        Ok(Self {
            start_date,
            end_date,
            days,
            start_time,
            duration_minutes,
        })
    }

    pub fn end_time(&self) -> NaiveTime {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// True when a session of this group takes place on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date
            && date <= self.end_date
            && self.days.contains(&ScheduleDay::from(date.weekday()))
    }

    /// Concrete session dates within `[from, to]`, in calendar order.
    pub fn occurrences_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut date = from.max(self.start_date);
        let last = to.min(self.end_date);
        while date <= last {
            if self.days.contains(&ScheduleDay::from(date.weekday())) {
                dates.push(date);
            }
            date += Duration::days(1);
        }
        dates
    }

    /// The weekly slots this schedule occupies, one per selected day.
    pub fn slots(&self) -> Vec<TimeSlot> {
        self.days
            .iter()
            .map(|&day| TimeSlot {
                day,
                start_time: self.start_time,
                duration_minutes: self.duration_minutes,
            })
            .collect()
    }
}

impl From<ScheduleError> for TypeConstraintError {
    fn from(err: ScheduleError) -> Self {
        TypeConstraintError::InvalidValue(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_worked_example_thirty_sessions_three_days() {
        // Saturday start, {Sat, Mon, Wed}, 30 sessions -> 10 weeks -> +70 days.
        let start = date(2025, 9, 6);
        assert_eq!(start.weekday(), Weekday::Sat);

        let days = [ScheduleDay::Sat, ScheduleDay::Mon, ScheduleDay::Wed];
        let end = derive_end_date(start, &days, 30).unwrap();

        assert_eq!(end, start + Duration::days(70));
    }

    #[test]
    fn test_partial_week_rounds_up() {
        let start = date(2025, 9, 6); // Saturday
        let days = [ScheduleDay::Sat, ScheduleDay::Mon];
        // 7 sessions over 2 weekly slots -> 4 weeks.
        let end = derive_end_date(start, &days, 7).unwrap();
        assert_eq!(end, start + Duration::days(28));
    }

    #[test]
    fn test_end_date_never_precedes_start() {
        let start = date(2025, 9, 6);
        for sessions in 1..40 {
            let end = derive_end_date(start, &[ScheduleDay::Sat], sessions).unwrap();
            assert!(end >= start);
        }
    }

    #[test]
    fn test_start_day_must_be_selected() {
        let start = date(2025, 9, 6); // Saturday
        let result = derive_end_date(start, &[ScheduleDay::Mon, ScheduleDay::Wed], 10);
        assert_eq!(result, Err(ScheduleError::StartDayNotSelected));
    }

    #[test]
    fn test_empty_days_and_zero_sessions_rejected() {
        let start = date(2025, 9, 6);
        assert_eq!(
            derive_end_date(start, &[], 10),
            Err(ScheduleError::NoDaysSelected)
        );
        assert_eq!(
            derive_end_date(start, &[ScheduleDay::Sat], 0),
            Err(ScheduleError::NoSessions)
        );
    }

    #[test]
    fn test_duplicate_days_counted_once() {
        let start = date(2025, 9, 6);
        let days = [ScheduleDay::Sat, ScheduleDay::Sat, ScheduleDay::Sat];
        // One effective slot per week: 4 sessions -> 4 weeks.
        let end = derive_end_date(start, &days, 4).unwrap();
        assert_eq!(end, start + Duration::days(28));
    }

    #[test]
    fn test_session_end_time_offset() {
        let end = session_end_time(time(16, 30), 90).unwrap();
        assert_eq!(end, time(18, 0));
        assert_eq!(session_end_time(time(10, 0), 0), Err(ScheduleError::NoDuration));
    }

    #[test]
    fn test_occurs_on_honors_bounds_and_days() {
        let schedule = GroupSchedule::derive(
            date(2025, 9, 6),
            &[ScheduleDay::Sat, ScheduleDay::Mon],
            time(17, 0),
            120,
            8,
        )
        .unwrap();

        assert!(schedule.occurs_on(date(2025, 9, 6))); // first Saturday
        assert!(schedule.occurs_on(date(2025, 9, 8))); // following Monday
        assert!(!schedule.occurs_on(date(2025, 9, 7))); // Sunday not selected
        assert!(!schedule.occurs_on(date(2025, 9, 5))); // before start
        assert!(!schedule.occurs_on(schedule.end_date + Duration::days(1)));
    }

    #[test]
    fn test_occurrences_between_lists_sessions_in_order() {
        let schedule = GroupSchedule::derive(
            date(2025, 9, 6),
            &[ScheduleDay::Sat, ScheduleDay::Wed],
            time(17, 0),
            120,
            4,
        )
        .unwrap();

        let dates = schedule.occurrences_between(date(2025, 9, 6), date(2025, 9, 13));
        assert_eq!(
            dates,
            vec![date(2025, 9, 6), date(2025, 9, 10), date(2025, 9, 13)]
        );
    }

    #[test]
    fn test_slot_overlap_is_symmetric() {
        let a = TimeSlot {
            day: ScheduleDay::Sat,
            start_time: time(10, 0),
            duration_minutes: 90,
        };
        let b = TimeSlot {
            day: ScheduleDay::Sat,
            start_time: time(11, 0),
            duration_minutes: 60,
        };
        let c = TimeSlot {
            day: ScheduleDay::Sat,
            start_time: time(11, 30),
            duration_minutes: 60,
        };
        let d = TimeSlot {
            day: ScheduleDay::Sun,
            start_time: time(10, 0),
            duration_minutes: 90,
        };

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Back-to-back slots do not collide.
        assert!(!a.overlaps(&c));
        // Different weekday never collides.
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_day_codes_round_trip() {
        for day in ScheduleDay::ALL {
            assert_eq!(day.code().parse::<ScheduleDay>().unwrap(), day);
        }
        assert!("noday".parse::<ScheduleDay>().is_err());
    }
}

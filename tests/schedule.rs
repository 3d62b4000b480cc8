//! End-date derivation properties over the public schedule API.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use academy_admin::domain::schedule::{
    GroupSchedule, ScheduleDay, ScheduleError, derive_end_date, session_end_time,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn end_date_is_start_plus_weeks_needed() {
    // Saturday start, {Sat, Mon, Wed}, 30 sessions
    // -> ceil(30 / 3) = 10 weeks -> end = start + 70 days.
    let start = date(2025, 9, 6);
    assert_eq!(start.weekday(), Weekday::Sat);

    let end = derive_end_date(
        start,
        &[ScheduleDay::Sat, ScheduleDay::Mon, ScheduleDay::Wed],
        30,
    )
    .unwrap();

    assert_eq!(end, start + Duration::days(70));
}

#[test]
fn end_date_never_precedes_start_for_any_valid_input() {
    // Walk a year of Saturdays against every non-empty day subset containing
    // Saturday and a spread of session counts.
    let mut start = date(2025, 1, 4);
    assert_eq!(start.weekday(), Weekday::Sat);

    let day_sets: [&[ScheduleDay]; 3] = [
        &[ScheduleDay::Sat],
        &[ScheduleDay::Sat, ScheduleDay::Tue],
        &[
            ScheduleDay::Sat,
            ScheduleDay::Sun,
            ScheduleDay::Tue,
            ScheduleDay::Thu,
        ],
    ];

    for _ in 0..52 {
        for days in day_sets {
            for sessions in [1, 7, 12, 48, 100] {
                let end = derive_end_date(start, days, sessions).unwrap();
                assert!(end >= start);

                // Weeks needed always covers the session count.
                let weeks = (end - start).num_days() / 7;
                assert!(weeks as u32 * days.len() as u32 >= sessions);
            }
        }
        start += Duration::days(7);
    }
}

#[test]
fn start_weekday_must_be_selected() {
    let monday = date(2025, 9, 8);
    assert_eq!(monday.weekday(), Weekday::Mon);

    assert_eq!(
        derive_end_date(monday, &[ScheduleDay::Sat, ScheduleDay::Wed], 10),
        Err(ScheduleError::StartDayNotSelected)
    );
    assert!(derive_end_date(monday, &[ScheduleDay::Mon], 10).is_ok());
}

#[test]
fn session_end_time_is_fixed_offset() {
    let start = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
    assert_eq!(
        session_end_time(start, 90).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    );
}

#[test]
fn derived_schedule_occurs_exactly_sessions_or_more_times() {
    let schedule = GroupSchedule::derive(
        date(2025, 9, 6),
        &[ScheduleDay::Sat, ScheduleDay::Mon, ScheduleDay::Wed],
        NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        90,
        30,
    )
    .unwrap();

    let occurrences = schedule.occurrences_between(schedule.start_date, schedule.end_date);

    // The derived window always provides at least the requested sessions.
    assert!(occurrences.len() >= 30);
    assert!(occurrences.iter().all(|d| schedule.occurs_on(*d)));
    assert_eq!(occurrences.first(), Some(&schedule.start_date));
}

//! Weekly schedule view built from the active course groups.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::course_group::CourseGroup;
use crate::domain::schedule::ScheduleDay;
use crate::domain::types::AcademyId;
use crate::dto::schedule::{DayColumn, ScheduleEntry, WeekView};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{GroupListQuery, GroupReader};
use crate::services::{ServiceResult, ensure_role};
use crate::SERVICE_ACCESS_ROLE;

/// Start of the academy week (Saturday) containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_back = (date.weekday().num_days_from_monday() + 2) % 7;
    date - Duration::days(i64::from(days_back))
}

/// Expands the groups into a Saturday-first weekly grid, one column per day,
/// entries ordered by start time.
pub fn build_week(week_start: NaiveDate, groups: &[CourseGroup]) -> WeekView {
    let days = (0..7)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            let mut entries: Vec<ScheduleEntry> = groups
                .iter()
                .filter(|group| !group.archived && group.schedule().occurs_on(date))
                .map(|group| ScheduleEntry {
                    group_id: group.id,
                    group_code: group.code.clone(),
                    lab_id: group.lab_id,
                    start_time: group.start_time,
                    end_time: group.end_time,
                })
                .collect();
            entries.sort_by_key(|entry| entry.start_time);

            DayColumn {
                date,
                day: ScheduleDay::from(date.weekday()),
                entries,
            }
        })
        .collect();

    WeekView { week_start, days }
}

/// Loads the weekly calendar for the week containing `reference`.
pub async fn load_week_view<R>(
    repo: &R,
    user: &AuthenticatedUser,
    reference: NaiveDate,
) -> ServiceResult<WeekView>
where
    R: GroupReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let (_, groups) = repo.list_groups(GroupListQuery::new(academy_id)).await?;

    Ok(build_week(week_start(reference), &groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn group(code: &str, days: Vec<ScheduleDay>, start_hour: u32) -> CourseGroup {
        let start = date(2025, 9, 6); // Saturday
        CourseGroup {
            id: 1,
            academy_id: 1,
            course_id: 1,
            branch_id: 1,
            lab_id: None,
            lecturer_id: 1,
            code: code.to_string(),
            start_date: start,
            end_date: start + Duration::days(70),
            days,
            start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start_hour + 2, 0, 0).unwrap(),
            duration_minutes: 120,
            sessions_count: 30,
            capacity: None,
            archived: false,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_week_start_rolls_back_to_saturday() {
        assert_eq!(week_start(date(2025, 9, 6)), date(2025, 9, 6)); // Sat
        assert_eq!(week_start(date(2025, 9, 7)), date(2025, 9, 6)); // Sun
        assert_eq!(week_start(date(2025, 9, 12)), date(2025, 9, 6)); // Fri
        assert_eq!(week_start(date(2025, 9, 13)), date(2025, 9, 13)); // next Sat
    }

    #[test]
    fn test_build_week_places_groups_on_their_days() {
        let groups = vec![
            group("ENG-01", vec![ScheduleDay::Sat, ScheduleDay::Mon], 17),
            group("MAT-02", vec![ScheduleDay::Sat], 9),
        ];

        let week = build_week(date(2025, 9, 6), &groups);

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].day, ScheduleDay::Sat);
        assert_eq!(week.days[0].date.weekday(), Weekday::Sat);

        // Saturday column holds both groups ordered by start time.
        let saturday_codes: Vec<&str> = week.days[0]
            .entries
            .iter()
            .map(|entry| entry.group_code.as_str())
            .collect();
        assert_eq!(saturday_codes, vec!["MAT-02", "ENG-01"]);

        // Monday is the third column of a Saturday-first week.
        assert_eq!(week.days[2].day, ScheduleDay::Mon);
        assert_eq!(week.days[2].entries.len(), 1);

        // Sunday has no sessions.
        assert_eq!(week.days[1].day, ScheduleDay::Sun);
        assert!(week.days[1].entries.is_empty());
    }

    #[test]
    fn test_build_week_skips_out_of_range_weeks() {
        let groups = vec![group("ENG-01", vec![ScheduleDay::Sat], 17)];

        // A week starting long after the group's end date stays empty.
        let week = build_week(date(2026, 3, 7), &groups);
        assert!(week.days.iter().all(|day| day.entries.is_empty()));
    }
}

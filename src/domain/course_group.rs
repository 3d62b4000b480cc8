use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::schedule::{GroupSchedule, ScheduleDay, ScheduleError};

/// A scheduled cohort of students taking a course level together.
///
/// `end_date` and `end_time` are derived from the start date, the selected
/// weekdays and the session count; the backend stores them as sent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CourseGroup {
    pub id: i32,
    pub academy_id: i32,
    pub course_id: i32,
    pub branch_id: i32,
    pub lab_id: Option<i32>,
    pub lecturer_id: i32,
    pub code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<ScheduleDay>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: u32,
    pub sessions_count: u32,
    pub capacity: Option<u32>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CourseGroup {
    /// The recurring weekly pattern of this group.
    pub fn schedule(&self) -> GroupSchedule {
        GroupSchedule {
            start_date: self.start_date,
            end_date: self.end_date,
            days: self.days.clone(),
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCourseGroup {
    pub academy_id: i32,
    pub course_id: i32,
    pub branch_id: i32,
    pub lab_id: Option<i32>,
    pub lecturer_id: i32,
    pub code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<ScheduleDay>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: u32,
    pub sessions_count: u32,
    pub capacity: Option<u32>,
}

impl NewCourseGroup {
    /// Builds a new group, deriving `end_date` and `end_time` from the
    /// schedule inputs. Fails when the start date does not fall on a selected
    /// weekday or the inputs are degenerate.
    #[must_use = "derivation can fail and must be checked"]
    #[allow(clippy::too_many_arguments)]
    pub fn derive(
        academy_id: i32,
        course_id: i32,
        branch_id: i32,
        lab_id: Option<i32>,
        lecturer_id: i32,
        code: String,
        start_date: NaiveDate,
        days: &[ScheduleDay],
        start_time: NaiveTime,
        duration_minutes: u32,
        sessions_count: u32,
        capacity: Option<u32>,
    ) -> Result<Self, ScheduleError> {
        let schedule =
            GroupSchedule::derive(start_date, days, start_time, duration_minutes, sessions_count)?;

        let end_time = schedule.end_time();
        Ok(Self {
            academy_id,
            course_id,
            branch_id,
            lab_id,
            lecturer_id,
            code: code.trim().to_string(),
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            days: schedule.days,
            start_time: schedule.start_time,
            end_time,
            duration_minutes,
            sessions_count,
            capacity,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCourseGroup {
    pub lab_id: Option<i32>,
    pub lecturer_id: i32,
    pub code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<ScheduleDay>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: u32,
    pub sessions_count: u32,
    pub capacity: Option<u32>,
}

impl UpdateCourseGroup {
    /// Re-derives the schedule for an edited group.
    #[allow(clippy::too_many_arguments)]
    pub fn derive(
        lab_id: Option<i32>,
        lecturer_id: i32,
        code: String,
        start_date: NaiveDate,
        days: &[ScheduleDay],
        start_time: NaiveTime,
        duration_minutes: u32,
        sessions_count: u32,
        capacity: Option<u32>,
    ) -> Result<Self, ScheduleError> {
        let schedule =
            GroupSchedule::derive(start_date, days, start_time, duration_minutes, sessions_count)?;

        let end_time = schedule.end_time();
        Ok(Self {
            lab_id,
            lecturer_id,
            code: code.trim().to_string(),
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            days: schedule.days,
            start_time: schedule.start_time,
            end_time,
            duration_minutes,
            sessions_count,
            capacity,
        })
    }
}

/// A student's registration in a course group, tracking balance owed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Enrollment {
    pub id: i32,
    pub academy_id: i32,
    pub group_id: i32,
    pub student_id: i32,
    pub agreed_price_minor: i64,
    pub paid_minor: i64,
    pub archived: bool,
    pub created_at: NaiveDateTime,
}

impl Enrollment {
    /// Outstanding balance in minor currency units.
    pub fn balance_minor(&self) -> i64 {
        self.agreed_price_minor - self.paid_minor
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub academy_id: i32,
    pub group_id: i32,
    pub student_id: i32,
    pub agreed_price_minor: i64,
}

impl NewEnrollment {
    #[must_use]
    pub fn new(academy_id: i32, group_id: i32, student_id: i32, agreed_price_minor: i64) -> Self {
        Self {
            academy_id,
            group_id,
            student_id,
            agreed_price_minor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_derive_fills_end_date_and_time() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(); // Saturday
        let group = NewCourseGroup::derive(
            1,
            2,
            3,
            Some(4),
            5,
            " ENG-A1-01 ".to_string(),
            start,
            &[ScheduleDay::Sat, ScheduleDay::Mon, ScheduleDay::Wed],
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            90,
            30,
            Some(12),
        )
        .unwrap();

        assert_eq!(group.code, "ENG-A1-01");
        assert_eq!(group.end_date, start + chrono::Duration::days(70));
        assert_eq!(group.end_time, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
    }

    #[test]
    fn test_enrollment_balance() {
        let enrollment = Enrollment {
            agreed_price_minor: 150_000,
            paid_minor: 90_000,
            ..Enrollment::default()
        };
        assert_eq!(enrollment.balance_minor(), 60_000);
    }
}

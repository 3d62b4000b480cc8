use serde::Deserialize;
use validator::Validate;

use crate::domain::course_group::{NewCourseGroup, NewEnrollment, UpdateCourseGroup};
use crate::domain::schedule::ScheduleDay;
use crate::forms::{FormError, optional_id, parse_date, parse_time};

/// Form data for creating a course group.
///
/// Posted as raw bytes and parsed with `serde_html_form` because `days` is a
/// multi-valued checkbox group.
#[derive(Debug, Deserialize, Validate)]
pub struct AddGroupForm {
    pub course_id: i32,
    pub branch_id: i32,
    pub lab_id: Option<i32>,
    pub lecturer_id: i32,
    #[validate(length(min = 1))]
    pub code: String,
    pub start_date: String,
    #[serde(default)]
    pub days: Vec<String>,
    pub start_time: String,
    #[validate(range(min = 15, max = 600))]
    pub duration_minutes: u32,
    #[validate(range(min = 1, max = 500))]
    pub sessions_count: u32,
    pub capacity: Option<u32>,
}

impl AddGroupForm {
    /// Parses an urlencoded body with repeated `days` fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(bytes)
            .map_err(|e| FormError::Mismatch(format!("malformed form body: {e}")))
    }

    fn parsed_days(&self) -> Result<Vec<ScheduleDay>, FormError> {
        self.days
            .iter()
            .map(|day| day.parse::<ScheduleDay>().map_err(FormError::from))
            .collect()
    }

    /// Derives the full group payload, including end date and end time.
    pub fn to_new_group(&self, academy_id: i32) -> Result<NewCourseGroup, FormError> {
        let group = NewCourseGroup::derive(
            academy_id,
            self.course_id,
            self.branch_id,
            optional_id(self.lab_id),
            self.lecturer_id,
            self.code.clone(),
            parse_date(&self.start_date)?,
            &self.parsed_days()?,
            parse_time(&self.start_time)?,
            self.duration_minutes,
            self.sessions_count,
            self.capacity.filter(|c| *c > 0),
        )?;

        Ok(group)
    }
}

/// Form data for editing an existing course group.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveGroupForm {
    pub id: i32,
    pub lab_id: Option<i32>,
    pub lecturer_id: i32,
    #[validate(length(min = 1))]
    pub code: String,
    pub start_date: String,
    #[serde(default)]
    pub days: Vec<String>,
    pub start_time: String,
    #[validate(range(min = 15, max = 600))]
    pub duration_minutes: u32,
    #[validate(range(min = 1, max = 500))]
    pub sessions_count: u32,
    pub capacity: Option<u32>,
}

impl SaveGroupForm {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(bytes)
            .map_err(|e| FormError::Mismatch(format!("malformed form body: {e}")))
    }

    pub fn to_updates(&self) -> Result<UpdateCourseGroup, FormError> {
        let days = self
            .days
            .iter()
            .map(|day| day.parse::<ScheduleDay>().map_err(FormError::from))
            .collect::<Result<Vec<ScheduleDay>, FormError>>()?;

        let updates = UpdateCourseGroup::derive(
            optional_id(self.lab_id),
            self.lecturer_id,
            self.code.clone(),
            parse_date(&self.start_date)?,
            &days,
            parse_time(&self.start_time)?,
            self.duration_minutes,
            self.sessions_count,
            self.capacity.filter(|c| *c > 0),
        )?;

        Ok(updates)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for enrolling a student into a group.
pub struct EnrollStudentForm {
    pub group_id: i32,
    pub student_id: i32,
    #[validate(range(min = 0))]
    pub agreed_price_minor: i64,
}

impl EnrollStudentForm {
    pub fn to_new_enrollment(&self, academy_id: i32) -> NewEnrollment {
        NewEnrollment::new(
            academy_id,
            self.group_id,
            self.student_id,
            self.agreed_price_minor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    #[test]
    fn test_from_bytes_collects_repeated_days() {
        let body = b"course_id=1&branch_id=2&lecturer_id=3&code=ENG-01&start_date=2025-09-06\
&days=sat&days=mon&days=wed&start_time=17%3A00&duration_minutes=90&sessions_count=30";

        let form = AddGroupForm::from_bytes(body).unwrap();
        assert_eq!(form.days, vec!["sat", "mon", "wed"]);
        assert_eq!(form.lab_id, None);
    }

    #[test]
    fn test_to_new_group_derives_schedule() {
        let body = b"course_id=1&branch_id=2&lecturer_id=3&code=ENG-01&start_date=2025-09-06\
&days=sat&days=mon&days=wed&start_time=17%3A00&duration_minutes=90&sessions_count=30";

        let form = AddGroupForm::from_bytes(body).unwrap();
        let group = form.to_new_group(9).unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
        assert_eq!(start.weekday(), Weekday::Sat);
        assert_eq!(group.academy_id, 9);
        assert_eq!(group.end_date, start + Duration::days(70));
        assert_eq!(group.end_time.to_string(), "18:30:00");
    }

    #[test]
    fn test_to_new_group_rejects_unselected_start_day() {
        // 2025-09-07 is a Sunday, but only Saturday is selected.
        let body = b"course_id=1&branch_id=2&lecturer_id=3&code=ENG-01&start_date=2025-09-07\
&days=sat&start_time=17%3A00&duration_minutes=90&sessions_count=30";

        let form = AddGroupForm::from_bytes(body).unwrap();
        assert!(matches!(
            form.to_new_group(9),
            Err(FormError::Schedule(_))
        ));
    }
}

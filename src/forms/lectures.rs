use serde::Deserialize;
use validator::Validate;

use crate::domain::lecture::{AttendanceStatus, NewAttendance, NewLecture, UpdateLecture};
use crate::forms::{FormError, none_if_blank, parse_date, parse_time};

#[derive(Deserialize, Validate)]
/// Form data for recording a delivered lecture.
pub struct AddLectureForm {
    pub group_id: i32,
    pub lecturer_id: i32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub topic: Option<String>,
}

impl AddLectureForm {
    pub fn to_new_lecture(&self, academy_id: i32) -> Result<NewLecture, FormError> {
        Ok(NewLecture::new(
            academy_id,
            self.group_id,
            self.lecturer_id,
            parse_date(&self.date)?,
            parse_time(&self.start_time)?,
            parse_time(&self.end_time)?,
            none_if_blank(self.topic.clone()),
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveLectureForm {
    pub id: i32,
    pub lecturer_id: i32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub topic: Option<String>,
}

impl SaveLectureForm {
    pub fn to_updates(&self) -> Result<UpdateLecture, FormError> {
        Ok(UpdateLecture {
            lecturer_id: self.lecturer_id,
            date: parse_date(&self.date)?,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
            topic: none_if_blank(self.topic.clone()),
        })
    }
}

/// Attendance marks posted as parallel `student_id`/`status` vectors, one
/// pair per enrolled student.
#[derive(Debug, Deserialize)]
pub struct AttendanceForm {
    pub lecture_id: i32,
    #[serde(default)]
    pub student_id: Vec<i32>,
    #[serde(default)]
    pub status: Vec<String>,
}

impl AttendanceForm {
    /// Parses an urlencoded body with repeated fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(bytes)
            .map_err(|e| FormError::Mismatch(format!("malformed form body: {e}")))
    }

    /// Zips the parallel vectors into attendance marks.
    pub fn to_new_attendance(&self) -> Result<NewAttendance, FormError> {
        if self.student_id.len() != self.status.len() {
            return Err(FormError::Mismatch(format!(
                "{} students but {} statuses",
                self.student_id.len(),
                self.status.len()
            )));
        }

        let marks = self
            .student_id
            .iter()
            .zip(self.status.iter())
            .map(|(&student_id, status)| {
                AttendanceStatus::try_from(status.as_str())
                    .map(|status| (student_id, status))
                    .map_err(FormError::InvalidChoice)
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(NewAttendance::new(self.lecture_id, marks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_form_zips_pairs() {
        let body = b"lecture_id=5&student_id=1&status=present&student_id=2&status=absent";
        let form = AttendanceForm::from_bytes(body).unwrap();
        let attendance = form.to_new_attendance().unwrap();

        assert_eq!(attendance.lecture_id, 5);
        assert_eq!(
            attendance.marks,
            vec![
                (1, AttendanceStatus::Present),
                (2, AttendanceStatus::Absent)
            ]
        );
    }

    #[test]
    fn test_attendance_form_rejects_uneven_vectors() {
        let body = b"lecture_id=5&student_id=1&student_id=2&status=present";
        let form = AttendanceForm::from_bytes(body).unwrap();
        assert!(matches!(
            form.to_new_attendance(),
            Err(FormError::Mismatch(_))
        ));
    }

    #[test]
    fn test_attendance_form_rejects_unknown_status() {
        let body = b"lecture_id=5&student_id=1&status=asleep";
        let form = AttendanceForm::from_bytes(body).unwrap();
        assert!(matches!(
            form.to_new_attendance(),
            Err(FormError::InvalidChoice(_))
        ));
    }
}

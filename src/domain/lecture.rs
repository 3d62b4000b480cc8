use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One delivered session of a course group.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Lecture {
    pub id: i32,
    pub academy_id: i32,
    pub group_id: i32,
    pub lecturer_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub topic: Option<String>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLecture {
    pub academy_id: i32,
    pub group_id: i32,
    pub lecturer_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub topic: Option<String>,
}

impl NewLecture {
    #[must_use]
    pub fn new(
        academy_id: i32,
        group_id: i32,
        lecturer_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        topic: Option<String>,
    ) -> Self {
        Self {
            academy_id,
            group_id,
            lecturer_id,
            date,
            start_time,
            end_time,
            topic: topic
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateLecture {
    pub lecturer_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub topic: Option<String>,
}

/// Presence of one enrolled student in one lecture.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::Excused => write!(f, "excused"),
        }
    }
}

impl TryFrom<&str> for AttendanceStatus {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "excused" => Ok(AttendanceStatus::Excused),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

/// A stored attendance mark.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i32,
    pub lecture_id: i32,
    pub student_id: i32,
    pub status: AttendanceStatus,
}

/// Attendance marks posted for a whole lecture at once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAttendance {
    pub lecture_id: i32,
    pub marks: Vec<(i32, AttendanceStatus)>,
}

impl NewAttendance {
    #[must_use]
    pub fn new(lecture_id: i32, marks: Vec<(i32, AttendanceStatus)>) -> Self {
        Self { lecture_id, marks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_round_trip() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
            AttendanceStatus::Excused,
        ] {
            let parsed = AttendanceStatus::try_from(status.to_string().as_str()).unwrap();
            assert_eq!(parsed, status);
        }
        assert!(AttendanceStatus::try_from("sleeping").is_err());
    }
}

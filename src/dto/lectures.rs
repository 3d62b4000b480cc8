use crate::domain::course_group::CourseGroup;
use crate::domain::lecture::{AttendanceRecord, Lecture};
use crate::domain::student::Student;
use crate::pagination::Paginated;

/// Query parameters accepted by the lectures register.
#[derive(Debug, Default)]
pub struct LecturesQuery {
    pub page: Option<usize>,
    pub group_id: Option<i32>,
}

/// Data required to render the lectures register.
pub struct LecturesPageData {
    pub lectures: Paginated<Lecture>,
    pub group: Option<CourseGroup>,
}

/// One roster row on the attendance sheet: the student plus their stored
/// mark, when any.
pub struct AttendanceRow {
    pub student: Student,
    pub record: Option<AttendanceRecord>,
}

/// Data required to render one lecture with its attendance sheet.
pub struct LecturePageData {
    pub lecture: Lecture,
    pub group: Option<CourseGroup>,
    pub sheet: Vec<AttendanceRow>,
}

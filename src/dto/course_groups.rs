use crate::domain::course_group::{CourseGroup, Enrollment};
use crate::domain::lecture::Lecture;
use crate::domain::student::Student;
use crate::pagination::Paginated;

/// Query parameters accepted by the groups register.
#[derive(Debug, Default)]
pub struct GroupsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub archived: bool,
    pub course_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub lecturer_id: Option<i32>,
}

/// Data required to render the groups register.
pub struct GroupsPageData {
    pub groups: Paginated<CourseGroup>,
    pub search_query: Option<String>,
    pub archived: bool,
}

/// One enrollment joined with its student for the roster table.
pub struct RosterRow {
    pub enrollment: Enrollment,
    pub student: Option<Student>,
}

/// Data required to render one group's detail page.
pub struct GroupPageData {
    pub group: CourseGroup,
    pub roster: Vec<RosterRow>,
    pub lectures: Vec<Lecture>,
}

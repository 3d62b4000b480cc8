use crate::domain::course_group::Enrollment;
use crate::domain::receipt::Receipt;
use crate::domain::student::Student;
use crate::pagination::Paginated;

/// Query parameters accepted by the students register.
#[derive(Debug, Default)]
pub struct StudentsQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
    /// Show archived students instead of active ones.
    pub archived: bool,
    /// Restrict the register to one branch.
    pub branch_id: Option<i32>,
}

/// Data required to render the students register.
pub struct StudentsPageData {
    pub students: Paginated<Student>,
    pub search_query: Option<String>,
    pub archived: bool,
}

/// Data required to render one student's detail page.
pub struct StudentPageData {
    pub student: Student,
    pub enrollments: Vec<Enrollment>,
    pub receipts: Vec<Receipt>,
}

//! Repository traits the services program against, plus the list-query
//! builders they are driven by. The only production implementation proxies
//! every call to the backend REST API ([`rest::RestRepository`]).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::branch::{Branch, Lab, NewBranch, NewLab, UpdateBranch, UpdateLab};
use crate::domain::course::{Course, NewCourse, UpdateCourse};
use crate::domain::course_group::{
    CourseGroup, Enrollment, NewCourseGroup, NewEnrollment, UpdateCourseGroup,
};
use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::domain::lecture::{AttendanceRecord, Lecture, NewAttendance, NewLecture, UpdateLecture};
use crate::domain::lecturer::{Lecturer, NewLecturer, UpdateLecturer};
use crate::domain::lookup::{Lookup, LookupKind, NewLookup, UpdateLookup};
use crate::domain::message::{
    Message, MessageTemplate, NewMessage, NewMessageTemplate, UpdateMessageTemplate,
};
use crate::domain::receipt::{NewReceipt, Receipt, ReceiptKind};
use crate::domain::student::{NewStudent, Student, UpdateStudent};
use crate::domain::types::{
    AcademyId, BranchId, CourseId, EmployeeId, EnrollmentId, GroupId, LabId, LectureId, LecturerId,
    LookupId, ReceiptId, StudentId, TemplateId,
};
use crate::repository::errors::RepositoryResult;

pub mod branches;
pub mod course_groups;
pub mod courses;
pub mod employees;
pub mod errors;
pub mod lectures;
pub mod lecturers;
pub mod lookups;
pub mod messages;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod receipts;
pub mod rest;
pub mod students;

pub use rest::{ApiClient, RestRepository};

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Common register filter: tenant scope, free-text search, archived toggle,
/// optional pagination.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub academy_id: AcademyId,
    pub search: Option<String>,
    pub archived: bool,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            academy_id,
            search: None,
            archived: false,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub base: ListQuery,
    pub branch_id: Option<BranchId>,
}

impl StudentListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            base: ListQuery::new(academy_id),
            branch_id: None,
        }
    }

    pub fn branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.base = self.base.search(term);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.base = self.base.archived(archived);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.base = self.base.paginate(page, per_page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GroupListQuery {
    pub base: ListQuery,
    pub course_id: Option<CourseId>,
    pub branch_id: Option<BranchId>,
    pub lecturer_id: Option<LecturerId>,
    pub lab_id: Option<LabId>,
}

impl GroupListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            base: ListQuery::new(academy_id),
            course_id: None,
            branch_id: None,
            lecturer_id: None,
            lab_id: None,
        }
    }

    pub fn course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    pub fn lecturer(mut self, lecturer_id: LecturerId) -> Self {
        self.lecturer_id = Some(lecturer_id);
        self
    }

    pub fn lab(mut self, lab_id: LabId) -> Self {
        self.lab_id = Some(lab_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.base = self.base.search(term);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.base = self.base.archived(archived);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.base = self.base.paginate(page, per_page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct LectureListQuery {
    pub base: ListQuery,
    pub group_id: Option<GroupId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl LectureListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            base: ListQuery::new(academy_id),
            group_id: None,
            date_from: None,
            date_to: None,
        }
    }

    pub fn group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.base = self.base.paginate(page, per_page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ReceiptListQuery {
    pub base: ListQuery,
    pub student_id: Option<StudentId>,
    pub kind: Option<ReceiptKind>,
    pub issued_from: Option<NaiveDate>,
    pub issued_to: Option<NaiveDate>,
}

impl ReceiptListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            base: ListQuery::new(academy_id),
            student_id: None,
            kind: None,
            issued_from: None,
            issued_to: None,
        }
    }

    pub fn student(mut self, student_id: StudentId) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn kind(mut self, kind: ReceiptKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn issued_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.issued_from = Some(from);
        self.issued_to = Some(to);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.base = self.base.search(term);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.base = self.base.paginate(page, per_page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct MessageListQuery {
    pub base: ListQuery,
    pub student_id: Option<StudentId>,
}

impl MessageListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            base: ListQuery::new(academy_id),
            student_id: None,
        }
    }

    pub fn student(mut self, student_id: StudentId) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.base = self.base.paginate(page, per_page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct EnrollmentListQuery {
    pub academy_id: AcademyId,
    pub group_id: Option<GroupId>,
    pub student_id: Option<StudentId>,
    pub pagination: Option<Pagination>,
}

impl EnrollmentListQuery {
    pub fn new(academy_id: AcademyId) -> Self {
        Self {
            academy_id,
            group_id: None,
            student_id: None,
            pagination: None,
        }
    }

    pub fn group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn student(mut self, student_id: StudentId) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[async_trait]
pub trait StudentReader {
    async fn get_student_by_id(
        &self,
        id: StudentId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Student>>;
    async fn list_students(
        &self,
        query: StudentListQuery,
    ) -> RepositoryResult<(usize, Vec<Student>)>;
}

#[async_trait]
pub trait StudentWriter {
    async fn create_students(&self, new_students: &[NewStudent]) -> RepositoryResult<usize>;
    async fn update_student(
        &self,
        id: StudentId,
        updates: &UpdateStudent,
    ) -> RepositoryResult<Student>;
    async fn delete_student(&self, id: StudentId) -> RepositoryResult<()>;
    async fn restore_student(&self, id: StudentId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait LecturerReader {
    async fn get_lecturer_by_id(
        &self,
        id: LecturerId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lecturer>>;
    async fn list_lecturers(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Lecturer>)>;
}

#[async_trait]
pub trait LecturerWriter {
    async fn create_lecturer(&self, new_lecturer: &NewLecturer) -> RepositoryResult<Lecturer>;
    async fn update_lecturer(
        &self,
        id: LecturerId,
        updates: &UpdateLecturer,
    ) -> RepositoryResult<Lecturer>;
    async fn delete_lecturer(&self, id: LecturerId) -> RepositoryResult<()>;
    async fn restore_lecturer(&self, id: LecturerId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait EmployeeReader {
    async fn get_employee_by_id(
        &self,
        id: EmployeeId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Employee>>;
    async fn list_employees(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
}

#[async_trait]
pub trait EmployeeWriter {
    async fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
    async fn update_employee(
        &self,
        id: EmployeeId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee>;
    async fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()>;
    async fn restore_employee(&self, id: EmployeeId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CourseReader {
    async fn get_course_by_id(
        &self,
        id: CourseId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Course>>;
    async fn list_courses(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Course>)>;
}

#[async_trait]
pub trait CourseWriter {
    async fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
    async fn update_course(&self, id: CourseId, updates: &UpdateCourse)
    -> RepositoryResult<Course>;
    async fn delete_course(&self, id: CourseId) -> RepositoryResult<()>;
    async fn restore_course(&self, id: CourseId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait BranchReader {
    async fn get_branch_by_id(
        &self,
        id: BranchId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Branch>>;
    async fn list_branches(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Branch>)>;
    async fn get_lab_by_id(&self, id: LabId, academy_id: AcademyId)
    -> RepositoryResult<Option<Lab>>;
    async fn list_labs(
        &self,
        academy_id: AcademyId,
        branch_id: Option<BranchId>,
    ) -> RepositoryResult<Vec<Lab>>;
}

#[async_trait]
pub trait BranchWriter {
    async fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch>;
    async fn update_branch(&self, id: BranchId, updates: &UpdateBranch)
    -> RepositoryResult<Branch>;
    async fn delete_branch(&self, id: BranchId) -> RepositoryResult<()>;
    async fn restore_branch(&self, id: BranchId) -> RepositoryResult<()>;
    async fn create_lab(&self, new_lab: &NewLab) -> RepositoryResult<Lab>;
    async fn update_lab(&self, id: LabId, updates: &UpdateLab) -> RepositoryResult<Lab>;
    async fn delete_lab(&self, id: LabId) -> RepositoryResult<()>;
    async fn restore_lab(&self, id: LabId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait GroupReader {
    async fn get_group_by_id(
        &self,
        id: GroupId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<CourseGroup>>;
    async fn list_groups(&self, query: GroupListQuery)
    -> RepositoryResult<(usize, Vec<CourseGroup>)>;
    async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
    ) -> RepositoryResult<(usize, Vec<Enrollment>)>;
}

#[async_trait]
pub trait GroupWriter {
    async fn create_group(&self, new_group: &NewCourseGroup) -> RepositoryResult<CourseGroup>;
    async fn update_group(
        &self,
        id: GroupId,
        updates: &UpdateCourseGroup,
    ) -> RepositoryResult<CourseGroup>;
    async fn delete_group(&self, id: GroupId) -> RepositoryResult<()>;
    async fn restore_group(&self, id: GroupId) -> RepositoryResult<()>;
    async fn create_enrollment(
        &self,
        new_enrollment: &NewEnrollment,
    ) -> RepositoryResult<Enrollment>;
    async fn delete_enrollment(&self, id: EnrollmentId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait LectureReader {
    async fn get_lecture_by_id(
        &self,
        id: LectureId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lecture>>;
    async fn list_lectures(&self, query: LectureListQuery)
    -> RepositoryResult<(usize, Vec<Lecture>)>;
    async fn list_attendance(&self, lecture_id: LectureId)
    -> RepositoryResult<Vec<AttendanceRecord>>;
}

#[async_trait]
pub trait LectureWriter {
    async fn create_lecture(&self, new_lecture: &NewLecture) -> RepositoryResult<Lecture>;
    async fn update_lecture(
        &self,
        id: LectureId,
        updates: &UpdateLecture,
    ) -> RepositoryResult<Lecture>;
    async fn delete_lecture(&self, id: LectureId) -> RepositoryResult<()>;
    async fn save_attendance(&self, attendance: &NewAttendance) -> RepositoryResult<usize>;
}

#[async_trait]
pub trait ReceiptReader {
    async fn get_receipt_by_id(
        &self,
        id: ReceiptId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Receipt>>;
    async fn list_receipts(&self, query: ReceiptListQuery)
    -> RepositoryResult<(usize, Vec<Receipt>)>;
}

#[async_trait]
pub trait ReceiptWriter {
    async fn create_receipt(&self, new_receipt: &NewReceipt) -> RepositoryResult<Receipt>;
    async fn void_receipt(&self, id: ReceiptId) -> RepositoryResult<()>;
    async fn restore_receipt(&self, id: ReceiptId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait MessageReader {
    async fn get_template_by_id(
        &self,
        id: TemplateId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<MessageTemplate>>;
    async fn list_templates(&self, query: ListQuery)
    -> RepositoryResult<(usize, Vec<MessageTemplate>)>;
    async fn list_messages(&self, query: MessageListQuery)
    -> RepositoryResult<(usize, Vec<Message>)>;
}

#[async_trait]
pub trait MessageWriter {
    async fn create_template(
        &self,
        new_template: &NewMessageTemplate,
    ) -> RepositoryResult<MessageTemplate>;
    async fn update_template(
        &self,
        id: TemplateId,
        updates: &UpdateMessageTemplate,
    ) -> RepositoryResult<MessageTemplate>;
    async fn delete_template(&self, id: TemplateId) -> RepositoryResult<()>;
    async fn restore_template(&self, id: TemplateId) -> RepositoryResult<()>;
    async fn create_messages(&self, new_messages: &[NewMessage]) -> RepositoryResult<usize>;
}

#[async_trait]
pub trait LookupReader {
    async fn get_lookup_by_id(
        &self,
        id: LookupId,
        kind: LookupKind,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lookup>>;
    async fn list_lookups(
        &self,
        kind: LookupKind,
        query: ListQuery,
    ) -> RepositoryResult<(usize, Vec<Lookup>)>;
}

#[async_trait]
pub trait LookupWriter {
    async fn create_lookup(&self, new_lookup: &NewLookup) -> RepositoryResult<Lookup>;
    async fn update_lookup(
        &self,
        id: LookupId,
        kind: LookupKind,
        updates: &UpdateLookup,
    ) -> RepositoryResult<Lookup>;
    async fn delete_lookup(&self, id: LookupId, kind: LookupKind) -> RepositoryResult<()>;
    async fn restore_lookup(&self, id: LookupId, kind: LookupKind) -> RepositoryResult<()>;
}

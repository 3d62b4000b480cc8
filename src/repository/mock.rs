//! Mock repository implementation for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

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
use crate::domain::receipt::{NewReceipt, Receipt};
use crate::domain::student::{NewStudent, Student, UpdateStudent};
use crate::domain::types::{
    AcademyId, BranchId, CourseId, EmployeeId, EnrollmentId, GroupId, LabId, LectureId, LecturerId,
    LookupId, ReceiptId, StudentId, TemplateId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BranchReader, BranchWriter, CourseReader, CourseWriter, EmployeeReader, EmployeeWriter,
    EnrollmentListQuery, GroupListQuery, GroupReader, GroupWriter, LectureListQuery, LectureReader,
    LectureWriter, LecturerReader, LecturerWriter, ListQuery, LookupReader, LookupWriter,
    MessageListQuery, MessageReader, MessageWriter, ReceiptListQuery, ReceiptReader, ReceiptWriter,
    StudentListQuery, StudentReader, StudentWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl StudentReader for Repository {
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
    impl StudentWriter for Repository {
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
    impl LecturerReader for Repository {
        async fn get_lecturer_by_id(
            &self,
            id: LecturerId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Lecturer>>;
        async fn list_lecturers(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Lecturer>)>;
    }

    #[async_trait]
    impl LecturerWriter for Repository {
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
    impl EmployeeReader for Repository {
        async fn get_employee_by_id(
            &self,
            id: EmployeeId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Employee>>;
        async fn list_employees(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
    }

    #[async_trait]
    impl EmployeeWriter for Repository {
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
    impl CourseReader for Repository {
        async fn get_course_by_id(
            &self,
            id: CourseId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Course>>;
        async fn list_courses(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Course>)>;
    }

    #[async_trait]
    impl CourseWriter for Repository {
        async fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
        async fn update_course(
            &self,
            id: CourseId,
            updates: &UpdateCourse,
        ) -> RepositoryResult<Course>;
        async fn delete_course(&self, id: CourseId) -> RepositoryResult<()>;
        async fn restore_course(&self, id: CourseId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl BranchReader for Repository {
        async fn get_branch_by_id(
            &self,
            id: BranchId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Branch>>;
        async fn list_branches(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Branch>)>;
        async fn get_lab_by_id(
            &self,
            id: LabId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Lab>>;
        async fn list_labs(
            &self,
            academy_id: AcademyId,
            branch_id: Option<BranchId>,
        ) -> RepositoryResult<Vec<Lab>>;
    }

    #[async_trait]
    impl BranchWriter for Repository {
        async fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch>;
        async fn update_branch(
            &self,
            id: BranchId,
            updates: &UpdateBranch,
        ) -> RepositoryResult<Branch>;
        async fn delete_branch(&self, id: BranchId) -> RepositoryResult<()>;
        async fn restore_branch(&self, id: BranchId) -> RepositoryResult<()>;
        async fn create_lab(&self, new_lab: &NewLab) -> RepositoryResult<Lab>;
        async fn update_lab(&self, id: LabId, updates: &UpdateLab) -> RepositoryResult<Lab>;
        async fn delete_lab(&self, id: LabId) -> RepositoryResult<()>;
        async fn restore_lab(&self, id: LabId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl GroupReader for Repository {
        async fn get_group_by_id(
            &self,
            id: GroupId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<CourseGroup>>;
        async fn list_groups(
            &self,
            query: GroupListQuery,
        ) -> RepositoryResult<(usize, Vec<CourseGroup>)>;
        async fn list_enrollments(
            &self,
            query: EnrollmentListQuery,
        ) -> RepositoryResult<(usize, Vec<Enrollment>)>;
    }

    #[async_trait]
    impl GroupWriter for Repository {
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
    impl LectureReader for Repository {
        async fn get_lecture_by_id(
            &self,
            id: LectureId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Lecture>>;
        async fn list_lectures(
            &self,
            query: LectureListQuery,
        ) -> RepositoryResult<(usize, Vec<Lecture>)>;
        async fn list_attendance(
            &self,
            lecture_id: LectureId,
        ) -> RepositoryResult<Vec<AttendanceRecord>>;
    }

    #[async_trait]
    impl LectureWriter for Repository {
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
    impl ReceiptReader for Repository {
        async fn get_receipt_by_id(
            &self,
            id: ReceiptId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<Receipt>>;
        async fn list_receipts(
            &self,
            query: ReceiptListQuery,
        ) -> RepositoryResult<(usize, Vec<Receipt>)>;
    }

    #[async_trait]
    impl ReceiptWriter for Repository {
        async fn create_receipt(&self, new_receipt: &NewReceipt) -> RepositoryResult<Receipt>;
        async fn void_receipt(&self, id: ReceiptId) -> RepositoryResult<()>;
        async fn restore_receipt(&self, id: ReceiptId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl MessageReader for Repository {
        async fn get_template_by_id(
            &self,
            id: TemplateId,
            academy_id: AcademyId,
        ) -> RepositoryResult<Option<MessageTemplate>>;
        async fn list_templates(
            &self,
            query: ListQuery,
        ) -> RepositoryResult<(usize, Vec<MessageTemplate>)>;
        async fn list_messages(
            &self,
            query: MessageListQuery,
        ) -> RepositoryResult<(usize, Vec<Message>)>;
    }

    #[async_trait]
    impl MessageWriter for Repository {
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
    impl LookupReader for Repository {
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
    impl LookupWriter for Repository {
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
}

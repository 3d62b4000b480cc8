//! Services handling the students register.

use validator::Validate;

use crate::dto::students::{StudentPageData, StudentsPageData, StudentsQuery};
use crate::forms::students::{AddStudentForm, SaveStudentForm, UploadStudentsForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    EnrollmentListQuery, GroupReader, ReceiptListQuery, ReceiptReader, StudentListQuery,
    StudentReader, StudentWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};
use crate::domain::types::{AcademyId, BranchId, StudentId};

/// Loads one page of the students register.
pub async fn load_students_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: StudentsQuery,
) -> ServiceResult<StudentsPageData>
where
    R: StudentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let page = query.page.unwrap_or(1);

    let mut list_query = StudentListQuery::new(academy_id)
        .archived(query.archived)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(branch_id) = query.branch_id {
        list_query = list_query.branch(BranchId::new(branch_id)?);
    }

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, students) = repo.list_students(list_query).await?;

    Ok(StudentsPageData {
        students: Paginated::from_total(students, page, total),
        search_query,
        archived: query.archived,
    })
}

/// Loads one student with their enrollments and receipts.
pub async fn load_student_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    student_id: i32,
) -> ServiceResult<StudentPageData>
where
    R: StudentReader + GroupReader + ReceiptReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let student_id = StudentId::new(student_id)?;

    let student = repo
        .get_student_by_id(student_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let (_, enrollments) = repo
        .list_enrollments(EnrollmentListQuery::new(academy_id).student(student_id))
        .await?;

    let (_, receipts) = repo
        .list_receipts(ReceiptListQuery::new(academy_id).student(student_id))
        .await?;

    Ok(StudentPageData {
        student,
        enrollments,
        receipts,
    })
}

/// Validates the add-student form and creates the record.
pub async fn add_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddStudentForm,
) -> ServiceResult<()>
where
    R: StudentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_student = form.to_new_student(user.academy_id)?;

    repo.create_students(&[new_student]).await.map_err(|err| {
        log::error!("Failed to add a student: {err}");
        err
    })?;

    Ok(())
}

/// Validates the save-student form and applies the updates.
pub async fn save_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveStudentForm,
) -> ServiceResult<()>
where
    R: StudentReader + StudentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let student_id = StudentId::new(form.id)?;

    repo.get_student_by_id(student_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let updates = form.to_updates()?;
    repo.update_student(student_id, &updates).await?;

    Ok(())
}

/// Archives a student record.
pub async fn delete_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    student_id: i32,
) -> ServiceResult<()>
where
    R: StudentReader + StudentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let student_id = StudentId::new(student_id)?;

    repo.get_student_by_id(student_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_student(student_id).await?;
    Ok(())
}

/// Restores a previously archived student record.
pub async fn restore_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    student_id: i32,
) -> ServiceResult<()>
where
    R: StudentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.restore_student(StudentId::new(student_id)?).await?;
    Ok(())
}

/// Parses the uploaded CSV file and creates student records in bulk.
pub async fn upload_students<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadStudentsForm,
) -> ServiceResult<usize>
where
    R: StudentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let students = form.parse(user.academy_id).map_err(|err| {
        log::error!("Failed to parse students: {err}");
        ServiceError::Form(format!("CSV import failed: {err}"))
    })?;

    let created = repo.create_students(&students).await.map_err(|err| {
        log::error!("Failed to add students: {err}");
        err
    })?;

    Ok(created)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@academy.example".to_string(),
            name: "Admin".to_string(),
            academy_id: 42,
            roles: vec![
                SERVICE_ACCESS_ROLE.to_string(),
                SERVICE_ADMIN_ROLE.to_string(),
            ],
            exp: 0,
        }
    }

    fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "viewer@academy.example".to_string(),
            name: "Viewer".to_string(),
            academy_id: 42,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    #[actix_web::test]
    async fn add_requires_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_create_students().times(0);
        let user = viewer_user();

        let form = AddStudentForm {
            name: "Omar".to_string(),
            email: None,
            phone: None,
            birth_date: None,
            branch_id: None,
            city_id: None,
            area_id: None,
            qualification_id: None,
            address: None,
            notes: None,
        };

        let result = add_student(&repo, &user, form).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn add_creates_scoped_student() {
        let mut repo = MockRepository::new();
        repo.expect_create_students()
            .withf(|students| students.len() == 1 && students[0].academy_id == 42)
            .times(1)
            .returning(|students| Ok(students.len()));
        let user = admin_user();

        let form = AddStudentForm {
            name: "Omar".to_string(),
            email: Some("Omar@Example.com".to_string()),
            phone: None,
            birth_date: Some("2001-02-03".to_string()),
            branch_id: Some(3),
            city_id: None,
            area_id: None,
            qualification_id: None,
            address: None,
            notes: None,
        };

        add_student(&repo, &user, form).await.expect("should add");
    }

    #[actix_web::test]
    async fn save_rejects_foreign_student() {
        let mut repo = MockRepository::new();
        repo.expect_get_student_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_update_student().times(0);
        let user = admin_user();

        let form = SaveStudentForm {
            id: 7,
            name: "Omar".to_string(),
            email: None,
            phone: None,
            birth_date: None,
            branch_id: None,
            city_id: None,
            area_id: None,
            qualification_id: None,
            address: None,
            notes: None,
        };

        let result = save_student(&repo, &user, form).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn list_passes_search_and_pagination() {
        let mut repo = MockRepository::new();
        repo.expect_list_students()
            .withf(|query| {
                query.base.search.as_deref() == Some("omar")
                    && query.base.pagination.map(|p| p.page) == Some(2)
            })
            .times(1)
            .returning(|_| Ok((0, vec![])));
        let user = viewer_user();

        let query = StudentsQuery {
            search: Some(" omar ".to_string()),
            page: Some(2),
            archived: false,
            branch_id: None,
        };

        load_students_page(&repo, &user, query)
            .await
            .expect("should list");
    }
}

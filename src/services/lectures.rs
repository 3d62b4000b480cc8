//! Services handling delivered lectures and attendance marking.

use std::collections::HashMap;

use validator::Validate;

use crate::domain::types::{AcademyId, GroupId, LectureId, StudentId};
use crate::dto::lectures::{AttendanceRow, LecturePageData, LecturesPageData, LecturesQuery};
use crate::forms::lectures::{AddLectureForm, AttendanceForm, SaveLectureForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    EnrollmentListQuery, GroupReader, LectureListQuery, LectureReader, LectureWriter,
    StudentReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads one page of the lectures register, optionally scoped to a group.
pub async fn load_lectures_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: LecturesQuery,
) -> ServiceResult<LecturesPageData>
where
    R: LectureReader + GroupReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let page = query.page.unwrap_or(1);

    let mut list_query =
        LectureListQuery::new(academy_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let mut group = None;
    if let Some(group_id) = query.group_id {
        let group_id = GroupId::new(group_id)?;
        group = repo.get_group_by_id(group_id, academy_id).await?;
        if group.is_none() {
            return Err(ServiceError::NotFound);
        }
        list_query = list_query.group(group_id);
    }

    let (total, lectures) = repo.list_lectures(list_query).await?;

    Ok(LecturesPageData {
        lectures: Paginated::from_total(lectures, page, total),
        group,
    })
}

/// Loads one lecture with its attendance sheet: every enrolled student of the
/// group plus their stored mark, when any.
pub async fn load_lecture_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lecture_id: i32,
) -> ServiceResult<LecturePageData>
where
    R: LectureReader + GroupReader + StudentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let lecture_id = LectureId::new(lecture_id)?;

    let lecture = repo
        .get_lecture_by_id(lecture_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let group = repo
        .get_group_by_id(GroupId::new(lecture.group_id)?, academy_id)
        .await?;

    let records = repo.list_attendance(lecture_id).await?;
    let mut by_student: HashMap<i32, _> = records
        .into_iter()
        .map(|record| (record.student_id, record))
        .collect();

    let (_, enrollments) = repo
        .list_enrollments(
            EnrollmentListQuery::new(academy_id).group(GroupId::new(lecture.group_id)?),
        )
        .await?;

    let mut sheet = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let Some(student) = repo
            .get_student_by_id(StudentId::new(enrollment.student_id)?, academy_id)
            .await?
        else {
            continue;
        };
        let record = by_student.remove(&student.id);
        sheet.push(AttendanceRow { student, record });
    }

    Ok(LecturePageData {
        lecture,
        group,
        sheet,
    })
}

/// Records a delivered lecture.
pub async fn add_lecture<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddLectureForm,
) -> ServiceResult<()>
where
    R: GroupReader + LectureWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;

    repo.get_group_by_id(GroupId::new(form.group_id)?, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.create_lecture(&form.to_new_lecture(user.academy_id)?)
        .await?;
    Ok(())
}

pub async fn save_lecture<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveLectureForm,
) -> ServiceResult<()>
where
    R: LectureReader + LectureWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let lecture_id = LectureId::new(form.id)?;

    repo.get_lecture_by_id(lecture_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_lecture(lecture_id, &form.to_updates()?).await?;
    Ok(())
}

pub async fn delete_lecture<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lecture_id: i32,
) -> ServiceResult<()>
where
    R: LectureReader + LectureWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let lecture_id = LectureId::new(lecture_id)?;

    repo.get_lecture_by_id(lecture_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_lecture(lecture_id).await?;
    Ok(())
}

/// Saves the posted attendance sheet in bulk.
pub async fn mark_attendance<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AttendanceForm,
) -> ServiceResult<usize>
where
    R: LectureReader + LectureWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;

    repo.get_lecture_by_id(LectureId::new(form.lecture_id)?, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let attendance = form.to_new_attendance()?;

    let saved = repo.save_attendance(&attendance).await.map_err(|err| {
        log::error!("Failed to save attendance: {err}");
        err
    })?;

    Ok(saved)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::lecture::Lecture;
    use crate::repository::mock::MockRepository;

    fn staff_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "staff@academy.example".to_string(),
            name: "Staff".to_string(),
            academy_id: 42,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    #[actix_web::test]
    async fn mark_attendance_saves_zipped_marks() {
        let mut repo = MockRepository::new();
        repo.expect_get_lecture_by_id().times(1).returning(|_, _| {
            Ok(Some(Lecture {
                id: 5,
                academy_id: 42,
                ..Lecture::default()
            }))
        });
        repo.expect_save_attendance()
            .withf(|attendance| attendance.lecture_id == 5 && attendance.marks.len() == 2)
            .times(1)
            .returning(|attendance| Ok(attendance.marks.len()));

        let form = AttendanceForm::from_bytes(
            b"lecture_id=5&student_id=1&status=present&student_id=2&status=late",
        )
        .unwrap();

        let saved = mark_attendance(&repo, &staff_user(), form)
            .await
            .expect("should save");
        assert_eq!(saved, 2);
    }

    #[actix_web::test]
    async fn mark_attendance_rejects_unknown_lecture() {
        let mut repo = MockRepository::new();
        repo.expect_get_lecture_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_save_attendance().times(0);

        let form = AttendanceForm::from_bytes(b"lecture_id=5&student_id=1&status=present").unwrap();

        let result = mark_attendance(&repo, &staff_user(), form).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}

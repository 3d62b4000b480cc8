//! Services handling course groups, their rosters and schedule derivation.

use validator::Validate;

use crate::domain::course_group::{CourseGroup, NewCourseGroup, UpdateCourseGroup};
use crate::domain::schedule::{GroupSchedule, ScheduleDay};
use crate::domain::types::{AcademyId, CourseId, EnrollmentId, GroupId, LabId, StudentId};
use crate::dto::course_groups::{GroupPageData, GroupsPageData, GroupsQuery, RosterRow};
use crate::forms::course_groups::{AddGroupForm, EnrollStudentForm, SaveGroupForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    EnrollmentListQuery, GroupListQuery, GroupReader, GroupWriter, LectureListQuery, LectureReader,
    StudentReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads one page of the groups register.
pub async fn load_groups_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: GroupsQuery,
) -> ServiceResult<GroupsPageData>
where
    R: GroupReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let page = query.page.unwrap_or(1);

    let mut list_query = GroupListQuery::new(academy_id)
        .archived(query.archived)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(course_id) = query.course_id {
        list_query = list_query.course(CourseId::new(course_id)?);
    }
    if let Some(branch_id) = query.branch_id {
        list_query = list_query.branch(crate::domain::types::BranchId::new(branch_id)?);
    }
    if let Some(lecturer_id) = query.lecturer_id {
        list_query = list_query.lecturer(crate::domain::types::LecturerId::new(lecturer_id)?);
    }

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, groups) = repo.list_groups(list_query).await?;

    Ok(GroupsPageData {
        groups: Paginated::from_total(groups, page, total),
        search_query,
        archived: query.archived,
    })
}

/// Loads one group with its roster and delivered lectures.
pub async fn load_group_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    group_id: i32,
) -> ServiceResult<GroupPageData>
where
    R: GroupReader + StudentReader + LectureReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let group_id = GroupId::new(group_id)?;

    let group = repo
        .get_group_by_id(group_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let (_, enrollments) = repo
        .list_enrollments(EnrollmentListQuery::new(academy_id).group(group_id))
        .await?;

    let mut roster = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let student = repo
            .get_student_by_id(StudentId::new(enrollment.student_id)?, academy_id)
            .await?;
        roster.push(RosterRow {
            enrollment,
            student,
        });
    }

    let (_, lectures) = repo
        .list_lectures(LectureListQuery::new(academy_id).group(group_id))
        .await?;

    Ok(GroupPageData {
        group,
        roster,
        lectures,
    })
}

/// Rejects a new schedule whose lab slots collide with another active group
/// in the same lab.
async fn ensure_lab_free<R>(
    repo: &R,
    academy_id: AcademyId,
    lab_id: i32,
    schedule: &GroupSchedule,
    skip_group: Option<i32>,
) -> ServiceResult<()>
where
    R: GroupReader + ?Sized,
{
    let (_, neighbours) = repo
        .list_groups(GroupListQuery::new(academy_id).lab(LabId::new(lab_id)?))
        .await?;

    let slots = schedule.slots();
    for neighbour in neighbours {
        if Some(neighbour.id) == skip_group || neighbour.archived {
            continue;
        }
        let taken = neighbour.schedule().slots();
        let collides = slots
            .iter()
            .any(|slot| taken.iter().any(|other| slot.overlaps(other)));
        if collides {
            return Err(ServiceError::Form(format!(
                "Lab is already booked by group {}",
                neighbour.code
            )));
        }
    }

    Ok(())
}

/// Validates the add-group form, derives the schedule and creates the group.
pub async fn add_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddGroupForm,
) -> ServiceResult<CourseGroup>
where
    R: GroupReader + GroupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_group: NewCourseGroup = form.to_new_group(user.academy_id)?;

    if let Some(lab_id) = new_group.lab_id {
        let schedule = GroupSchedule {
            start_date: new_group.start_date,
            end_date: new_group.end_date,
            days: new_group.days.clone(),
            start_time: new_group.start_time,
            duration_minutes: new_group.duration_minutes,
        };
        ensure_lab_free(
            repo,
            AcademyId::new(user.academy_id)?,
            lab_id,
            &schedule,
            None,
        )
        .await?;
    }

    let group = repo.create_group(&new_group).await.map_err(|err| {
        log::error!("Failed to create group: {err}");
        err
    })?;

    Ok(group)
}

/// Validates the save-group form, re-derives the schedule and saves.
pub async fn save_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveGroupForm,
) -> ServiceResult<()>
where
    R: GroupReader + GroupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let group_id = GroupId::new(form.id)?;

    repo.get_group_by_id(group_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let updates: UpdateCourseGroup = form.to_updates()?;

    if let Some(lab_id) = updates.lab_id {
        let schedule = GroupSchedule {
            start_date: updates.start_date,
            end_date: updates.end_date,
            days: updates.days.clone(),
            start_time: updates.start_time,
            duration_minutes: updates.duration_minutes,
        };
        ensure_lab_free(repo, academy_id, lab_id, &schedule, Some(form.id)).await?;
    }

    repo.update_group(group_id, &updates).await?;
    Ok(())
}

pub async fn delete_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    group_id: i32,
) -> ServiceResult<()>
where
    R: GroupReader + GroupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let group_id = GroupId::new(group_id)?;

    repo.get_group_by_id(group_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_group(group_id).await?;
    Ok(())
}

pub async fn restore_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    group_id: i32,
) -> ServiceResult<()>
where
    R: GroupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_group(GroupId::new(group_id)?).await?;
    Ok(())
}

/// Enrolls a student into a group, respecting capacity when set.
pub async fn enroll_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EnrollStudentForm,
) -> ServiceResult<()>
where
    R: GroupReader + GroupWriter + StudentReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let group_id = GroupId::new(form.group_id)?;

    let group = repo
        .get_group_by_id(group_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.get_student_by_id(StudentId::new(form.student_id)?, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let (enrolled, _) = repo
        .list_enrollments(
            EnrollmentListQuery::new(academy_id)
                .group(group_id)
                .paginate(1, 1),
        )
        .await?;

    if let Some(capacity) = group.capacity
        && enrolled >= capacity as usize
    {
        return Err(ServiceError::Form("Group is full".to_string()));
    }

    repo.create_enrollment(&form.to_new_enrollment(user.academy_id))
        .await?;
    Ok(())
}

/// Removes a student's enrollment.
pub async fn unenroll_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    enrollment_id: i32,
) -> ServiceResult<()>
where
    R: GroupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.delete_enrollment(EnrollmentId::new(enrollment_id)?)
        .await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

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

    fn group_form() -> AddGroupForm {
        AddGroupForm::from_bytes(
            b"course_id=1&branch_id=2&lab_id=4&lecturer_id=3&code=ENG-01&start_date=2025-09-06\
&days=sat&days=mon&start_time=17%3A00&duration_minutes=90&sessions_count=8",
        )
        .unwrap()
    }

    fn booked_group(code: &str, start_time: NaiveTime) -> CourseGroup {
        let start = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
        CourseGroup {
            id: 77,
            academy_id: 42,
            course_id: 1,
            branch_id: 2,
            lab_id: Some(4),
            lecturer_id: 3,
            code: code.to_string(),
            start_date: start,
            end_date: start + chrono::Duration::days(28),
            days: vec![ScheduleDay::Sat],
            start_time,
            end_time: start_time + chrono::Duration::minutes(90),
            duration_minutes: 90,
            sessions_count: 8,
            capacity: None,
            archived: false,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[actix_web::test]
    async fn add_group_rejects_lab_collision() {
        let mut repo = MockRepository::new();
        repo.expect_list_groups().times(1).returning(|_| {
            Ok((
                1,
                vec![booked_group(
                    "MAT-02",
                    NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
                )],
            ))
        });
        repo.expect_create_group().times(0);

        let result = add_group(&repo, &admin_user(), group_form()).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn add_group_allows_disjoint_slots() {
        let mut repo = MockRepository::new();
        repo.expect_list_groups().times(1).returning(|_| {
            Ok((
                1,
                vec![booked_group(
                    "MAT-02",
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                )],
            ))
        });
        repo.expect_create_group()
            .withf(|group| group.code == "ENG-01" && group.academy_id == 42)
            .times(1)
            .returning(|group| {
                Ok(CourseGroup {
                    id: 1,
                    academy_id: group.academy_id,
                    course_id: group.course_id,
                    branch_id: group.branch_id,
                    lab_id: group.lab_id,
                    lecturer_id: group.lecturer_id,
                    code: group.code.clone(),
                    start_date: group.start_date,
                    end_date: group.end_date,
                    days: group.days.clone(),
                    start_time: group.start_time,
                    end_time: group.end_time,
                    duration_minutes: group.duration_minutes,
                    sessions_count: group.sessions_count,
                    capacity: group.capacity,
                    archived: false,
                    created_at: NaiveDateTime::default(),
                    updated_at: NaiveDateTime::default(),
                })
            });

        let group = add_group(&repo, &admin_user(), group_form())
            .await
            .expect("should create");
        assert_eq!(
            group.end_date,
            NaiveDate::from_ymd_opt(2025, 9, 6).unwrap() + chrono::Duration::days(28)
        );
    }

    #[actix_web::test]
    async fn enroll_rejects_full_group() {
        let mut repo = MockRepository::new();
        repo.expect_get_group_by_id().times(1).returning(|_, _| {
            let mut group = booked_group("ENG-01", NaiveTime::from_hms_opt(17, 0, 0).unwrap());
            group.capacity = Some(1);
            Ok(Some(group))
        });
        repo.expect_get_student_by_id()
            .times(1)
            .returning(|_, _| Ok(Some(crate::domain::student::Student::default())));
        repo.expect_list_enrollments()
            .times(1)
            .returning(|_| Ok((1, vec![])));
        repo.expect_create_enrollment().times(0);

        let form = EnrollStudentForm {
            group_id: 77,
            student_id: 5,
            agreed_price_minor: 100_000,
        };

        let result = enroll_student(&repo, &admin_user(), form).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}

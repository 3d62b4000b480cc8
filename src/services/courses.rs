//! Services handling the courses register.

use validator::Validate;

use crate::domain::course::Course;
use crate::domain::types::{AcademyId, CourseId};
use crate::forms::courses::{AddCourseForm, SaveCourseForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CourseReader, CourseWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn list_courses<R>(
    repo: &R,
    user: &AuthenticatedUser,
    search: Option<String>,
    page: usize,
    archived: bool,
) -> ServiceResult<Paginated<Course>>
where
    R: CourseReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = ListQuery::new(AcademyId::new(user.academy_id)?)
        .archived(archived)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    let (total, courses) = repo.list_courses(query).await?;
    Ok(Paginated::from_total(courses, page, total))
}

pub async fn add_course<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCourseForm,
) -> ServiceResult<()>
where
    R: CourseWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.create_course(&form.to_new_course(user.academy_id)).await?;
    Ok(())
}

pub async fn save_course<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveCourseForm,
) -> ServiceResult<()>
where
    R: CourseReader + CourseWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let course_id = CourseId::new(form.id)?;

    repo.get_course_by_id(course_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_course(course_id, &form.to_updates()).await?;
    Ok(())
}

pub async fn delete_course<R>(
    repo: &R,
    user: &AuthenticatedUser,
    course_id: i32,
) -> ServiceResult<()>
where
    R: CourseReader + CourseWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let course_id = CourseId::new(course_id)?;

    repo.get_course_by_id(course_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_course(course_id).await?;
    Ok(())
}

pub async fn restore_course<R>(
    repo: &R,
    user: &AuthenticatedUser,
    course_id: i32,
) -> ServiceResult<()>
where
    R: CourseWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_course(CourseId::new(course_id)?).await?;
    Ok(())
}

//! Services handling the lecturers register.

use validator::Validate;

use crate::domain::lecturer::Lecturer;
use crate::domain::types::{AcademyId, LecturerId};
use crate::forms::lecturers::{AddLecturerForm, SaveLecturerForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{LecturerReader, LecturerWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn list_lecturers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    search: Option<String>,
    page: usize,
    archived: bool,
) -> ServiceResult<Paginated<Lecturer>>
where
    R: LecturerReader + ?Sized,
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

    let (total, lecturers) = repo.list_lecturers(query).await?;
    Ok(Paginated::from_total(lecturers, page, total))
}

pub async fn add_lecturer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddLecturerForm,
) -> ServiceResult<()>
where
    R: LecturerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_lecturer = form.to_new_lecturer(user.academy_id)?;
    repo.create_lecturer(&new_lecturer).await?;
    Ok(())
}

pub async fn save_lecturer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveLecturerForm,
) -> ServiceResult<()>
where
    R: LecturerReader + LecturerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let lecturer_id = LecturerId::new(form.id)?;

    repo.get_lecturer_by_id(lecturer_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_lecturer(lecturer_id, &form.to_updates()?).await?;
    Ok(())
}

pub async fn delete_lecturer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lecturer_id: i32,
) -> ServiceResult<()>
where
    R: LecturerReader + LecturerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let lecturer_id = LecturerId::new(lecturer_id)?;

    repo.get_lecturer_by_id(lecturer_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_lecturer(lecturer_id).await?;
    Ok(())
}

pub async fn restore_lecturer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lecturer_id: i32,
) -> ServiceResult<()>
where
    R: LecturerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_lecturer(LecturerId::new(lecturer_id)?).await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

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
        repo.expect_create_lecturer().times(0);

        let form = AddLecturerForm {
            name: "Dr. Salma".to_string(),
            email: None,
            phone: None,
            specialty: None,
            qualification_id: None,
        };

        let result = add_lecturer(&repo, &viewer_user(), form).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn list_scopes_to_academy() {
        let mut repo = MockRepository::new();
        repo.expect_list_lecturers()
            .withf(|query| query.academy_id.get() == 42 && !query.archived)
            .times(1)
            .returning(|_| Ok((0, vec![])));

        list_lecturers(&repo, &viewer_user(), None, 1, false)
            .await
            .expect("should list");
    }
}

//! Services handling branches and their lab rooms.

use validator::Validate;

use crate::domain::branch::{Branch, Lab};
use crate::domain::types::{AcademyId, BranchId, LabId};
use crate::forms::branches::{AddBranchForm, AddLabForm, SaveBranchForm, SaveLabForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{BranchReader, BranchWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn list_branches<R>(
    repo: &R,
    user: &AuthenticatedUser,
    search: Option<String>,
    page: usize,
    archived: bool,
) -> ServiceResult<Paginated<Branch>>
where
    R: BranchReader + ?Sized,
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

    let (total, branches) = repo.list_branches(query).await?;
    Ok(Paginated::from_total(branches, page, total))
}

/// Loads one branch and its labs for the detail page.
pub async fn load_branch_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    branch_id: i32,
) -> ServiceResult<(Branch, Vec<Lab>)>
where
    R: BranchReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let branch_id = BranchId::new(branch_id)?;

    let branch = repo
        .get_branch_by_id(branch_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let labs = repo.list_labs(academy_id, Some(branch_id)).await?;

    Ok((branch, labs))
}

pub async fn add_branch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddBranchForm,
) -> ServiceResult<()>
where
    R: BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.create_branch(&form.to_new_branch(user.academy_id)?)
        .await?;
    Ok(())
}

pub async fn save_branch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveBranchForm,
) -> ServiceResult<()>
where
    R: BranchReader + BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let branch_id = BranchId::new(form.id)?;

    repo.get_branch_by_id(branch_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_branch(branch_id, &form.to_updates()?).await?;
    Ok(())
}

pub async fn delete_branch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    branch_id: i32,
) -> ServiceResult<()>
where
    R: BranchReader + BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let branch_id = BranchId::new(branch_id)?;

    repo.get_branch_by_id(branch_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_branch(branch_id).await?;
    Ok(())
}

pub async fn restore_branch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    branch_id: i32,
) -> ServiceResult<()>
where
    R: BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_branch(BranchId::new(branch_id)?).await?;
    Ok(())
}

pub async fn add_lab<R>(repo: &R, user: &AuthenticatedUser, form: AddLabForm) -> ServiceResult<()>
where
    R: BranchReader + BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;

    // The lab must hang off a branch of the same academy.
    repo.get_branch_by_id(BranchId::new(form.branch_id)?, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.create_lab(&form.to_new_lab(user.academy_id)).await?;
    Ok(())
}

pub async fn save_lab<R>(repo: &R, user: &AuthenticatedUser, form: SaveLabForm) -> ServiceResult<()>
where
    R: BranchReader + BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let lab_id = LabId::new(form.id)?;

    repo.get_lab_by_id(lab_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_lab(lab_id, &form.to_updates()).await?;
    Ok(())
}

pub async fn delete_lab<R>(repo: &R, user: &AuthenticatedUser, lab_id: i32) -> ServiceResult<()>
where
    R: BranchReader + BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let lab_id = LabId::new(lab_id)?;

    repo.get_lab_by_id(lab_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_lab(lab_id).await?;
    Ok(())
}

pub async fn restore_lab<R>(repo: &R, user: &AuthenticatedUser, lab_id: i32) -> ServiceResult<()>
where
    R: BranchWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_lab(LabId::new(lab_id)?).await?;
    Ok(())
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

    #[actix_web::test]
    async fn add_lab_requires_owned_branch() {
        let mut repo = MockRepository::new();
        repo.expect_get_branch_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_lab().times(0);

        let form = AddLabForm {
            branch_id: 9,
            name: "Lab 1".to_string(),
            capacity: 16,
        };

        let result = add_lab(&repo, &admin_user(), form).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}

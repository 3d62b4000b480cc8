//! Services handling the reference lookup tables.

use validator::Validate;

use crate::domain::lookup::{Lookup, LookupKind};
use crate::domain::types::{AcademyId, LookupId};
use crate::forms::lookups::{AddLookupForm, SaveLookupForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ListQuery, LookupReader, LookupWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn list_lookups<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: LookupKind,
    page: usize,
    archived: bool,
) -> ServiceResult<Paginated<Lookup>>
where
    R: LookupReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let query = ListQuery::new(AcademyId::new(user.academy_id)?)
        .archived(archived)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, lookups) = repo.list_lookups(kind, query).await?;
    Ok(Paginated::from_total(lookups, page, total))
}

/// Loads every lookup of a kind without pagination, for dropdowns.
pub async fn list_options<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: LookupKind,
) -> ServiceResult<Vec<Lookup>>
where
    R: LookupReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let query = ListQuery::new(AcademyId::new(user.academy_id)?);
    let (_, lookups) = repo.list_lookups(kind, query).await?;
    Ok(lookups)
}

pub async fn add_lookup<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddLookupForm,
) -> ServiceResult<LookupKind>
where
    R: LookupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_lookup = form.to_new_lookup(user.academy_id)?;
    let kind = new_lookup.kind;

    repo.create_lookup(&new_lookup).await?;
    Ok(kind)
}

pub async fn save_lookup<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveLookupForm,
) -> ServiceResult<LookupKind>
where
    R: LookupReader + LookupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let lookup_id = LookupId::new(form.id)?;
    let kind = form.parsed_kind()?;

    repo.get_lookup_by_id(lookup_id, kind, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_lookup(lookup_id, kind, &form.to_updates()?)
        .await?;
    Ok(kind)
}

pub async fn delete_lookup<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lookup_id: i32,
    kind: LookupKind,
) -> ServiceResult<()>
where
    R: LookupReader + LookupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let lookup_id = LookupId::new(lookup_id)?;

    repo.get_lookup_by_id(lookup_id, kind, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_lookup(lookup_id, kind).await?;
    Ok(())
}

pub async fn restore_lookup<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lookup_id: i32,
    kind: LookupKind,
) -> ServiceResult<()>
where
    R: LookupWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_lookup(LookupId::new(lookup_id)?, kind).await?;
    Ok(())
}

//! Services handling the employees register.

use validator::Validate;

use crate::domain::employee::Employee;
use crate::domain::types::{AcademyId, EmployeeId};
use crate::forms::employees::{AddEmployeeForm, SaveEmployeeForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{EmployeeReader, EmployeeWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn list_employees<R>(
    repo: &R,
    user: &AuthenticatedUser,
    search: Option<String>,
    page: usize,
    archived: bool,
) -> ServiceResult<Paginated<Employee>>
where
    R: EmployeeReader + ?Sized,
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

    let (total, employees) = repo.list_employees(query).await?;
    Ok(Paginated::from_total(employees, page, total))
}

pub async fn add_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddEmployeeForm,
) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.create_employee(&form.to_new_employee(user.academy_id)?)
        .await?;
    Ok(())
}

pub async fn save_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveEmployeeForm,
) -> ServiceResult<()>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let employee_id = EmployeeId::new(form.id)?;

    repo.get_employee_by_id(employee_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_employee(employee_id, &form.to_updates()?).await?;
    Ok(())
}

pub async fn delete_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
) -> ServiceResult<()>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let employee_id = EmployeeId::new(employee_id)?;

    repo.get_employee_by_id(employee_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_employee(employee_id).await?;
    Ok(())
}

pub async fn restore_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_employee(EmployeeId::new(employee_id)?).await?;
    Ok(())
}

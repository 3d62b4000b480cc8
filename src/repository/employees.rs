use async_trait::async_trait;

use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::domain::types::{AcademyId, EmployeeId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{EmployeeReader, EmployeeWriter, ListQuery};

const RESOURCE: &str = "employees";

#[async_trait]
impl EmployeeReader for RestRepository {
    async fn get_employee_by_id(
        &self,
        id: EmployeeId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Employee>> {
        let employee = self.api().get_one::<Employee>(RESOURCE, id.get()).await?;
        Ok(employee.filter(|e| e.academy_id == academy_id.get()))
    }

    async fn list_employees(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Employee>)> {
        let params = base_params(&query);
        let page = self.api().get_page::<Employee>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl EmployeeWriter for RestRepository {
    async fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        self.api().post(RESOURCE, new_employee).await
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_employee(&self, id: EmployeeId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }
}

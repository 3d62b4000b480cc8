use async_trait::async_trait;

use crate::domain::branch::{Branch, Lab, NewBranch, NewLab, UpdateBranch, UpdateLab};
use crate::domain::types::{AcademyId, BranchId, LabId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{BranchReader, BranchWriter, ListQuery};

const RESOURCE: &str = "branches";
const LAB_RESOURCE: &str = "labs";

#[async_trait]
impl BranchReader for RestRepository {
    async fn get_branch_by_id(
        &self,
        id: BranchId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Branch>> {
        let branch = self.api().get_one::<Branch>(RESOURCE, id.get()).await?;
        Ok(branch.filter(|b| b.academy_id == academy_id.get()))
    }

    async fn list_branches(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Branch>)> {
        let params = base_params(&query);
        let page = self.api().get_page::<Branch>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }

    async fn get_lab_by_id(
        &self,
        id: LabId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lab>> {
        let lab = self.api().get_one::<Lab>(LAB_RESOURCE, id.get()).await?;
        Ok(lab.filter(|l| l.academy_id == academy_id.get()))
    }

    async fn list_labs(
        &self,
        academy_id: AcademyId,
        branch_id: Option<BranchId>,
    ) -> RepositoryResult<Vec<Lab>> {
        let mut params = vec![("academy_id".to_string(), academy_id.get().to_string())];
        if let Some(branch_id) = branch_id {
            params.push(("branch_id".to_string(), branch_id.get().to_string()));
        }

        let page = self.api().get_page::<Lab>(LAB_RESOURCE, &params).await?;
        Ok(page.data)
    }
}

#[async_trait]
impl BranchWriter for RestRepository {
    async fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch> {
        self.api().post(RESOURCE, new_branch).await
    }

    async fn update_branch(
        &self,
        id: BranchId,
        updates: &UpdateBranch,
    ) -> RepositoryResult<Branch> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_branch(&self, id: BranchId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_branch(&self, id: BranchId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }

    async fn create_lab(&self, new_lab: &NewLab) -> RepositoryResult<Lab> {
        self.api().post(LAB_RESOURCE, new_lab).await
    }

    async fn update_lab(&self, id: LabId, updates: &UpdateLab) -> RepositoryResult<Lab> {
        self.api().put(LAB_RESOURCE, id.get(), updates).await
    }

    async fn delete_lab(&self, id: LabId) -> RepositoryResult<()> {
        self.api().delete(LAB_RESOURCE, id.get()).await
    }

    async fn restore_lab(&self, id: LabId) -> RepositoryResult<()> {
        self.api().restore(LAB_RESOURCE, id.get()).await
    }
}

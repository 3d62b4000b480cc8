use async_trait::async_trait;

use crate::domain::lecturer::{Lecturer, NewLecturer, UpdateLecturer};
use crate::domain::types::{AcademyId, LecturerId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{LecturerReader, LecturerWriter, ListQuery};

const RESOURCE: &str = "lecturers";

#[async_trait]
impl LecturerReader for RestRepository {
    async fn get_lecturer_by_id(
        &self,
        id: LecturerId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lecturer>> {
        let lecturer = self.api().get_one::<Lecturer>(RESOURCE, id.get()).await?;
        Ok(lecturer.filter(|l| l.academy_id == academy_id.get()))
    }

    async fn list_lecturers(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Lecturer>)> {
        let params = base_params(&query);
        let page = self.api().get_page::<Lecturer>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl LecturerWriter for RestRepository {
    async fn create_lecturer(&self, new_lecturer: &NewLecturer) -> RepositoryResult<Lecturer> {
        self.api().post(RESOURCE, new_lecturer).await
    }

    async fn update_lecturer(
        &self,
        id: LecturerId,
        updates: &UpdateLecturer,
    ) -> RepositoryResult<Lecturer> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_lecturer(&self, id: LecturerId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_lecturer(&self, id: LecturerId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }
}

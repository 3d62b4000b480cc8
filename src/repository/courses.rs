use async_trait::async_trait;

use crate::domain::course::{Course, NewCourse, UpdateCourse};
use crate::domain::types::{AcademyId, CourseId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{CourseReader, CourseWriter, ListQuery};

const RESOURCE: &str = "courses";

#[async_trait]
impl CourseReader for RestRepository {
    async fn get_course_by_id(
        &self,
        id: CourseId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Course>> {
        let course = self.api().get_one::<Course>(RESOURCE, id.get()).await?;
        Ok(course.filter(|c| c.academy_id == academy_id.get()))
    }

    async fn list_courses(&self, query: ListQuery) -> RepositoryResult<(usize, Vec<Course>)> {
        let params = base_params(&query);
        let page = self.api().get_page::<Course>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl CourseWriter for RestRepository {
    async fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course> {
        self.api().post(RESOURCE, new_course).await
    }

    async fn update_course(
        &self,
        id: CourseId,
        updates: &UpdateCourse,
    ) -> RepositoryResult<Course> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_course(&self, id: CourseId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_course(&self, id: CourseId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }
}

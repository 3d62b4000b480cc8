use async_trait::async_trait;

use crate::domain::student::{NewStudent, Student, UpdateStudent};
use crate::domain::types::{AcademyId, StudentId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{StudentListQuery, StudentReader, StudentWriter};

const RESOURCE: &str = "students";

#[async_trait]
impl StudentReader for RestRepository {
    async fn get_student_by_id(
        &self,
        id: StudentId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Student>> {
        let student = self.api().get_one::<Student>(RESOURCE, id.get()).await?;

        // Records of other academies are invisible.
        Ok(student.filter(|s| s.academy_id == academy_id.get()))
    }

    async fn list_students(
        &self,
        query: StudentListQuery,
    ) -> RepositoryResult<(usize, Vec<Student>)> {
        let mut params = base_params(&query.base);
        if let Some(branch_id) = query.branch_id {
            params.push(("branch_id".to_string(), branch_id.get().to_string()));
        }

        let page = self.api().get_page::<Student>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl StudentWriter for RestRepository {
    async fn create_students(&self, new_students: &[NewStudent]) -> RepositoryResult<usize> {
        for new_student in new_students {
            self.api().post::<_, Student>(RESOURCE, new_student).await?;
        }
        Ok(new_students.len())
    }

    async fn update_student(
        &self,
        id: StudentId,
        updates: &UpdateStudent,
    ) -> RepositoryResult<Student> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_student(&self, id: StudentId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_student(&self, id: StudentId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }
}

use async_trait::async_trait;

use crate::domain::course_group::{
    CourseGroup, Enrollment, NewCourseGroup, NewEnrollment, UpdateCourseGroup,
};
use crate::domain::types::{AcademyId, EnrollmentId, GroupId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params, push_pagination};
use crate::repository::{EnrollmentListQuery, GroupListQuery, GroupReader, GroupWriter};

const RESOURCE: &str = "course-groups";
const ENROLLMENT_RESOURCE: &str = "enrollments";

#[async_trait]
impl GroupReader for RestRepository {
    async fn get_group_by_id(
        &self,
        id: GroupId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<CourseGroup>> {
        let group = self.api().get_one::<CourseGroup>(RESOURCE, id.get()).await?;
        Ok(group.filter(|g| g.academy_id == academy_id.get()))
    }

    async fn list_groups(
        &self,
        query: GroupListQuery,
    ) -> RepositoryResult<(usize, Vec<CourseGroup>)> {
        let mut params = base_params(&query.base);
        if let Some(course_id) = query.course_id {
            params.push(("course_id".to_string(), course_id.get().to_string()));
        }
        if let Some(branch_id) = query.branch_id {
            params.push(("branch_id".to_string(), branch_id.get().to_string()));
        }
        if let Some(lecturer_id) = query.lecturer_id {
            params.push(("lecturer_id".to_string(), lecturer_id.get().to_string()));
        }
        if let Some(lab_id) = query.lab_id {
            params.push(("lab_id".to_string(), lab_id.get().to_string()));
        }

        let page = self.api().get_page::<CourseGroup>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }

    async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
    ) -> RepositoryResult<(usize, Vec<Enrollment>)> {
        let mut params = vec![(
            "academy_id".to_string(),
            query.academy_id.get().to_string(),
        )];
        if let Some(group_id) = query.group_id {
            params.push(("group_id".to_string(), group_id.get().to_string()));
        }
        if let Some(student_id) = query.student_id {
            params.push(("student_id".to_string(), student_id.get().to_string()));
        }
        push_pagination(&mut params, query.pagination);

        let page = self
            .api()
            .get_page::<Enrollment>(ENROLLMENT_RESOURCE, &params)
            .await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl GroupWriter for RestRepository {
    async fn create_group(&self, new_group: &NewCourseGroup) -> RepositoryResult<CourseGroup> {
        self.api().post(RESOURCE, new_group).await
    }

    async fn update_group(
        &self,
        id: GroupId,
        updates: &UpdateCourseGroup,
    ) -> RepositoryResult<CourseGroup> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_group(&self, id: GroupId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_group(&self, id: GroupId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }

    async fn create_enrollment(
        &self,
        new_enrollment: &NewEnrollment,
    ) -> RepositoryResult<Enrollment> {
        self.api().post(ENROLLMENT_RESOURCE, new_enrollment).await
    }

    async fn delete_enrollment(&self, id: EnrollmentId) -> RepositoryResult<()> {
        self.api().delete(ENROLLMENT_RESOURCE, id.get()).await
    }
}

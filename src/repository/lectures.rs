use async_trait::async_trait;

use crate::domain::lecture::{AttendanceRecord, Lecture, NewAttendance, NewLecture, UpdateLecture};
use crate::domain::types::{AcademyId, LectureId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{LectureListQuery, LectureReader, LectureWriter};

const RESOURCE: &str = "lectures";

#[async_trait]
impl LectureReader for RestRepository {
    async fn get_lecture_by_id(
        &self,
        id: LectureId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lecture>> {
        let lecture = self.api().get_one::<Lecture>(RESOURCE, id.get()).await?;
        Ok(lecture.filter(|l| l.academy_id == academy_id.get()))
    }

    async fn list_lectures(
        &self,
        query: LectureListQuery,
    ) -> RepositoryResult<(usize, Vec<Lecture>)> {
        let mut params = base_params(&query.base);
        if let Some(group_id) = query.group_id {
            params.push(("group_id".to_string(), group_id.get().to_string()));
        }
        if let Some(from) = query.date_from {
            params.push(("date_from".to_string(), from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = query.date_to {
            params.push(("date_to".to_string(), to.format("%Y-%m-%d").to_string()));
        }

        let page = self.api().get_page::<Lecture>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }

    async fn list_attendance(
        &self,
        lecture_id: LectureId,
    ) -> RepositoryResult<Vec<AttendanceRecord>> {
        let params = vec![("lecture_id".to_string(), lecture_id.get().to_string())];
        let page = self
            .api()
            .get_page::<AttendanceRecord>("attendance", &params)
            .await?;
        Ok(page.data)
    }
}

#[async_trait]
impl LectureWriter for RestRepository {
    async fn create_lecture(&self, new_lecture: &NewLecture) -> RepositoryResult<Lecture> {
        self.api().post(RESOURCE, new_lecture).await
    }

    async fn update_lecture(
        &self,
        id: LectureId,
        updates: &UpdateLecture,
    ) -> RepositoryResult<Lecture> {
        self.api().put(RESOURCE, id.get(), updates).await
    }

    async fn delete_lecture(&self, id: LectureId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn save_attendance(&self, attendance: &NewAttendance) -> RepositoryResult<usize> {
        let path = format!("{RESOURCE}/{id}/attendance", id = attendance.lecture_id);
        self.api().post_unit(&path, attendance).await?;
        Ok(attendance.marks.len())
    }
}

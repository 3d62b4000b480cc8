//! Dashboard service.

use crate::domain::types::AcademyId;
use crate::dto::main::DashboardData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    CourseReader, GroupListQuery, GroupReader, LecturerReader, ListQuery, StudentListQuery,
    StudentReader,
};
use crate::services::{ServiceResult, ensure_role};
use crate::SERVICE_ACCESS_ROLE;

/// Loads the tenant-scoped counters for the dashboard.
///
/// Each register is asked for a single-item page; only the envelope total is
/// used.
pub async fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardData>
where
    R: StudentReader + LecturerReader + GroupReader + CourseReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;

    let (students_total, _) = repo
        .list_students(StudentListQuery::new(academy_id).paginate(1, 1))
        .await?;
    let (lecturers_total, _) = repo
        .list_lecturers(ListQuery::new(academy_id).paginate(1, 1))
        .await?;
    let (groups_total, _) = repo
        .list_groups(GroupListQuery::new(academy_id).paginate(1, 1))
        .await?;
    let (courses_total, _) = repo
        .list_courses(ListQuery::new(academy_id).paginate(1, 1))
        .await?;

    Ok(DashboardData {
        students_total,
        lecturers_total,
        groups_total,
        courses_total,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[actix_web::test]
    async fn dashboard_requires_access_role() {
        let repo = MockRepository::new();
        let user = AuthenticatedUser {
            sub: "9".to_string(),
            email: "nobody@academy.example".to_string(),
            name: "Nobody".to_string(),
            academy_id: 42,
            roles: vec![],
            exp: 0,
        };

        let result = load_dashboard(&repo, &user).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn dashboard_collects_totals() {
        let mut repo = MockRepository::new();
        repo.expect_list_students()
            .times(1)
            .returning(|_| Ok((120, vec![])));
        repo.expect_list_lecturers()
            .times(1)
            .returning(|_| Ok((8, vec![])));
        repo.expect_list_groups()
            .times(1)
            .returning(|_| Ok((15, vec![])));
        repo.expect_list_courses()
            .times(1)
            .returning(|_| Ok((6, vec![])));

        let user = AuthenticatedUser {
            sub: "1".to_string(),
            email: "staff@academy.example".to_string(),
            name: "Staff".to_string(),
            academy_id: 42,
            roles: vec![crate::SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        };

        let data = load_dashboard(&repo, &user).await.expect("should load");
        assert_eq!(data.students_total, 120);
        assert_eq!(data.lecturers_total, 8);
        assert_eq!(data.groups_total, 15);
        assert_eq!(data.courses_total, 6);
    }
}

//! Services handling message templates and outbound messages.

use validator::Validate;

use crate::domain::message::{Message, MessageTemplate, NewMessage};
use crate::domain::types::{AcademyId, GroupId, StudentId, TemplateId};
use crate::forms::messages::{
    AddTemplateForm, MessageRecipient, SaveTemplateForm, SendMessageForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    EnrollmentListQuery, GroupReader, ListQuery, MessageListQuery, MessageReader, MessageWriter,
    StudentReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn list_templates<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<Paginated<MessageTemplate>>
where
    R: MessageReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let query = ListQuery::new(AcademyId::new(user.academy_id)?)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, templates) = repo.list_templates(query).await?;
    Ok(Paginated::from_total(templates, page, total))
}

pub async fn list_messages<R>(
    repo: &R,
    user: &AuthenticatedUser,
    student_id: Option<i32>,
    page: usize,
) -> ServiceResult<Paginated<Message>>
where
    R: MessageReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = MessageListQuery::new(AcademyId::new(user.academy_id)?)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(student_id) = student_id {
        query = query.student(StudentId::new(student_id)?);
    }

    let (total, messages) = repo.list_messages(query).await?;
    Ok(Paginated::from_total(messages, page, total))
}

pub async fn add_template<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddTemplateForm,
) -> ServiceResult<()>
where
    R: MessageWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.create_template(&form.to_new_template(user.academy_id)?)
        .await?;
    Ok(())
}

pub async fn save_template<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveTemplateForm,
) -> ServiceResult<()>
where
    R: MessageReader + MessageWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;
    let template_id = TemplateId::new(form.id)?;

    repo.get_template_by_id(template_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.update_template(template_id, &form.to_updates()?).await?;
    Ok(())
}

pub async fn delete_template<R>(
    repo: &R,
    user: &AuthenticatedUser,
    template_id: i32,
) -> ServiceResult<()>
where
    R: MessageReader + MessageWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let template_id = TemplateId::new(template_id)?;

    repo.get_template_by_id(template_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_template(template_id).await?;
    Ok(())
}

pub async fn restore_template<R>(
    repo: &R,
    user: &AuthenticatedUser,
    template_id: i32,
) -> ServiceResult<()>
where
    R: MessageWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_template(TemplateId::new(template_id)?).await?;
    Ok(())
}

/// Renders the template for every recipient and queues the messages via the
/// backend. Returns how many messages were queued.
pub async fn send_message<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SendMessageForm,
) -> ServiceResult<usize>
where
    R: MessageReader + MessageWriter + StudentReader + GroupReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;

    let template = repo
        .get_template_by_id(TemplateId::new(form.template_id)?, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let student_ids: Vec<i32> = match form.recipient()? {
        MessageRecipient::Student(student_id) => vec![student_id],
        MessageRecipient::Group(group_id) => {
            let group_id = GroupId::new(group_id)?;
            repo.get_group_by_id(group_id, academy_id)
                .await?
                .ok_or(ServiceError::NotFound)?;

            let (_, enrollments) = repo
                .list_enrollments(EnrollmentListQuery::new(academy_id).group(group_id))
                .await?;
            enrollments.into_iter().map(|e| e.student_id).collect()
        }
    };

    let mut outgoing = Vec::with_capacity(student_ids.len());
    for student_id in student_ids {
        let Some(student) = repo
            .get_student_by_id(StudentId::new(student_id)?, academy_id)
            .await?
        else {
            continue;
        };

        outgoing.push(NewMessage::new(
            user.academy_id,
            student.id,
            Some(template.id),
            template.channel,
            template.render(&student.name),
        ));
    }

    if outgoing.is_empty() {
        return Err(ServiceError::Form("No recipients found".to_string()));
    }

    let queued = repo.create_messages(&outgoing).await.map_err(|err| {
        log::error!("Failed to queue messages: {err}");
        err
    })?;

    Ok(queued)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::course_group::Enrollment;
    use crate::domain::message::MessageChannel;
    use crate::domain::student::Student;
    use crate::repository::mock::MockRepository;

    fn staff_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "staff@academy.example".to_string(),
            name: "Staff".to_string(),
            academy_id: 42,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn template() -> MessageTemplate {
        MessageTemplate {
            id: 3,
            academy_id: 42,
            name: "reminder".to_string(),
            channel: MessageChannel::Sms,
            body: "Hi {{name}}".to_string(),
            ..MessageTemplate::default()
        }
    }

    #[actix_web::test]
    async fn send_renders_template_per_group_member() {
        let mut repo = MockRepository::new();
        repo.expect_get_template_by_id()
            .times(1)
            .returning(|_, _| Ok(Some(template())));
        repo.expect_get_group_by_id().times(1).returning(|_, _| {
            Ok(Some(crate::domain::course_group::CourseGroup {
                id: 7,
                academy_id: 42,
                course_id: 1,
                branch_id: 1,
                lab_id: None,
                lecturer_id: 1,
                code: "ENG-01".to_string(),
                start_date: chrono::NaiveDate::default(),
                end_date: chrono::NaiveDate::default(),
                days: vec![],
                start_time: chrono::NaiveTime::default(),
                end_time: chrono::NaiveTime::default(),
                duration_minutes: 90,
                sessions_count: 8,
                capacity: None,
                archived: false,
                created_at: chrono::NaiveDateTime::default(),
                updated_at: chrono::NaiveDateTime::default(),
            }))
        });
        repo.expect_list_enrollments().times(1).returning(|_| {
            Ok((
                2,
                vec![
                    Enrollment {
                        id: 1,
                        student_id: 11,
                        ..Enrollment::default()
                    },
                    Enrollment {
                        id: 2,
                        student_id: 12,
                        ..Enrollment::default()
                    },
                ],
            ))
        });
        repo.expect_get_student_by_id()
            .times(2)
            .returning(|id, _| {
                Ok(Some(Student {
                    id: id.get(),
                    name: format!("Student {}", id.get()),
                    ..Student::default()
                }))
            });
        repo.expect_create_messages()
            .withf(|messages| {
                messages.len() == 2 && messages[0].body == "Hi Student 11"
            })
            .times(1)
            .returning(|messages| Ok(messages.len()));

        let form = SendMessageForm {
            template_id: 3,
            student_id: None,
            group_id: Some(7),
        };

        let queued = send_message(&repo, &staff_user(), form)
            .await
            .expect("should queue");
        assert_eq!(queued, 2);
    }
}

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::schedule::ScheduleDay;
use crate::dto::course_groups::GroupsQuery;
use crate::forms::course_groups::{AddGroupForm, EnrollStudentForm, SaveGroupForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ServiceError;
use crate::services::course_groups as groups_service;

#[derive(Deserialize)]
struct GroupsQueryParams {
    q: Option<String>,
    page: Option<usize>,
    archived: Option<bool>,
    course_id: Option<i32>,
    branch_id: Option<i32>,
    lecturer_id: Option<i32>,
}

#[get("/groups")]
pub async fn show_groups(
    params: web::Query<GroupsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = GroupsQuery {
        search: params.q,
        page: params.page,
        archived: params.archived.unwrap_or(false),
        course_id: params.course_id,
        branch_id: params.branch_id,
        lecturer_id: params.lecturer_id,
    };

    match groups_service::load_groups_page(repo.get_ref(), &user, query).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "groups",
                &server_config.auth_service_url,
            );
            context.insert("groups", &data.groups);
            context.insert("archived", &data.archived);
            context.insert("weekdays", &ScheduleDay::ALL);
            if let Some(search_query) = &data.search_query {
                context.insert("search_query", search_query);
            }

            render_template(&tera, "groups/index.html", &context)
        }
        Err(err) => service_error_response(err, "/groups"),
    }
}

#[get("/groups/{group_id}")]
pub async fn show_group(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match groups_service::load_group_page(repo.get_ref(), &user, group_id.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "groups",
                &server_config.auth_service_url,
            );
            context.insert("group", &data.group);
            context.insert("lectures", &data.lectures);
            context.insert("weekdays", &ScheduleDay::ALL);

            let roster: Vec<_> = data
                .roster
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "enrollment": row.enrollment,
                        "student": row.student,
                        "balance_minor": row.enrollment.balance_minor(),
                    })
                })
                .collect();
            context.insert("roster", &roster);

            render_template(&tera, "groups/show.html", &context)
        }
        Err(err) => service_error_response(err, "/groups"),
    }
}

/// Creation posts raw bytes: the weekday checkboxes arrive as repeated
/// `days` fields that `web::Form` cannot collect.
#[post("/groups/add")]
pub async fn add_group(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match AddGroupForm::from_bytes(body.as_ref()) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse group form: {err}");
            FlashMessage::error("Form validation failed").send();
            return redirect("/groups");
        }
    };

    match groups_service::add_group(repo.get_ref(), &user, form).await {
        Ok(group) => {
            FlashMessage::success(format!(
                "Group {} scheduled until {}.",
                group.code, group.end_date
            ))
            .send();
            redirect(&format!("/groups/{}", group.id))
        }
        Err(err) => service_error_response(err, "/groups"),
    }
}

#[post("/groups/save")]
pub async fn save_group(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match SaveGroupForm::from_bytes(body.as_ref()) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse group form: {err}");
            FlashMessage::error("Form validation failed").send();
            return redirect("/groups");
        }
    };

    let back = format!("/groups/{}", form.id);

    match groups_service::save_group(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Group updated.").send();
            redirect(&back)
        }
        Err(err @ ServiceError::Form(_)) => service_error_response(err, &back),
        Err(err) => service_error_response(err, "/groups"),
    }
}

#[post("/groups/{group_id}/delete")]
pub async fn delete_group(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match groups_service::delete_group(repo.get_ref(), &user, group_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Group archived.").send();
            redirect("/groups")
        }
        Err(err) => service_error_response(err, "/groups"),
    }
}

#[post("/groups/{group_id}/restore")]
pub async fn restore_group(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match groups_service::restore_group(repo.get_ref(), &user, group_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Group restored.").send();
            redirect("/groups?archived=true")
        }
        Err(err) => service_error_response(err, "/groups?archived=true"),
    }
}

#[post("/groups/enroll")]
pub async fn enroll_student(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<EnrollStudentForm>,
) -> impl Responder {
    let back = format!("/groups/{}", form.group_id);

    match groups_service::enroll_student(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Student enrolled.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

#[derive(Deserialize)]
struct UnenrollForm {
    enrollment_id: i32,
    group_id: i32,
}

#[post("/groups/unenroll")]
pub async fn unenroll_student(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<UnenrollForm>,
) -> impl Responder {
    let back = format!("/groups/{}", form.group_id);

    match groups_service::unenroll_student(repo.get_ref(), &user, form.enrollment_id).await {
        Ok(()) => {
            FlashMessage::success("Enrollment removed.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::lecturers::{AddLecturerForm, SaveLecturerForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::lecturers as lecturers_service;

#[derive(Deserialize)]
struct LecturersQueryParams {
    q: Option<String>,
    page: Option<usize>,
    archived: Option<bool>,
}

#[get("/lecturers")]
pub async fn show_lecturers(
    params: web::Query<LecturersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);
    let archived = params.archived.unwrap_or(false);

    match lecturers_service::list_lecturers(
        repo.get_ref(),
        &user,
        params.q.clone(),
        page,
        archived,
    )
    .await
    {
        Ok(lecturers) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "lecturers",
                &server_config.auth_service_url,
            );
            context.insert("lecturers", &lecturers);
            context.insert("archived", &archived);
            if let Some(q) = params.q.filter(|q| !q.trim().is_empty()) {
                context.insert("search_query", &q);
            }

            render_template(&tera, "lecturers/index.html", &context)
        }
        Err(err) => service_error_response(err, "/lecturers"),
    }
}

#[post("/lecturers/add")]
pub async fn add_lecturer(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddLecturerForm>,
) -> impl Responder {
    match lecturers_service::add_lecturer(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Lecturer added.").send();
            redirect("/lecturers")
        }
        Err(err) => service_error_response(err, "/lecturers"),
    }
}

#[post("/lecturers/save")]
pub async fn save_lecturer(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveLecturerForm>,
) -> impl Responder {
    match lecturers_service::save_lecturer(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Lecturer updated.").send();
            redirect("/lecturers")
        }
        Err(err) => service_error_response(err, "/lecturers"),
    }
}

#[post("/lecturers/{lecturer_id}/delete")]
pub async fn delete_lecturer(
    lecturer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match lecturers_service::delete_lecturer(repo.get_ref(), &user, lecturer_id.into_inner()).await
    {
        Ok(()) => {
            FlashMessage::success("Lecturer archived.").send();
            redirect("/lecturers")
        }
        Err(err) => service_error_response(err, "/lecturers"),
    }
}

#[post("/lecturers/{lecturer_id}/restore")]
pub async fn restore_lecturer(
    lecturer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match lecturers_service::restore_lecturer(repo.get_ref(), &user, lecturer_id.into_inner()).await
    {
        Ok(()) => {
            FlashMessage::success("Lecturer restored.").send();
            redirect("/lecturers?archived=true")
        }
        Err(err) => service_error_response(err, "/lecturers?archived=true"),
    }
}

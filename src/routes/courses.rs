use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::courses::{AddCourseForm, SaveCourseForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::courses as courses_service;

#[derive(Deserialize)]
struct CoursesQueryParams {
    q: Option<String>,
    page: Option<usize>,
    archived: Option<bool>,
}

#[get("/courses")]
pub async fn show_courses(
    params: web::Query<CoursesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);
    let archived = params.archived.unwrap_or(false);

    match courses_service::list_courses(repo.get_ref(), &user, params.q.clone(), page, archived)
        .await
    {
        Ok(courses) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "courses",
                &server_config.auth_service_url,
            );
            context.insert("courses", &courses);
            context.insert("archived", &archived);
            if let Some(q) = params.q.filter(|q| !q.trim().is_empty()) {
                context.insert("search_query", &q);
            }

            render_template(&tera, "courses/index.html", &context)
        }
        Err(err) => service_error_response(err, "/courses"),
    }
}

#[post("/courses/add")]
pub async fn add_course(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddCourseForm>,
) -> impl Responder {
    match courses_service::add_course(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Course added.").send();
            redirect("/courses")
        }
        Err(err) => service_error_response(err, "/courses"),
    }
}

#[post("/courses/save")]
pub async fn save_course(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveCourseForm>,
) -> impl Responder {
    match courses_service::save_course(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Course updated.").send();
            redirect("/courses")
        }
        Err(err) => service_error_response(err, "/courses"),
    }
}

#[post("/courses/{course_id}/delete")]
pub async fn delete_course(
    course_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match courses_service::delete_course(repo.get_ref(), &user, course_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Course archived.").send();
            redirect("/courses")
        }
        Err(err) => service_error_response(err, "/courses"),
    }
}

#[post("/courses/{course_id}/restore")]
pub async fn restore_course(
    course_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match courses_service::restore_course(repo.get_ref(), &user, course_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Course restored.").send();
            redirect("/courses?archived=true")
        }
        Err(err) => service_error_response(err, "/courses?archived=true"),
    }
}

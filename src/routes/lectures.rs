use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::dto::lectures::LecturesQuery;
use crate::forms::lectures::{AddLectureForm, AttendanceForm, SaveLectureForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::lectures as lectures_service;

#[derive(Deserialize)]
struct LecturesQueryParams {
    page: Option<usize>,
    group_id: Option<i32>,
}

#[get("/lectures")]
pub async fn show_lectures(
    params: web::Query<LecturesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = LecturesQuery {
        page: params.page,
        group_id: params.group_id,
    };

    match lectures_service::load_lectures_page(repo.get_ref(), &user, query).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "lectures",
                &server_config.auth_service_url,
            );
            context.insert("lectures", &data.lectures);
            if let Some(group) = &data.group {
                context.insert("group", group);
            }

            render_template(&tera, "lectures/index.html", &context)
        }
        Err(err) => service_error_response(err, "/lectures"),
    }
}

#[get("/lectures/{lecture_id}")]
pub async fn show_lecture(
    lecture_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match lectures_service::load_lecture_page(repo.get_ref(), &user, lecture_id.into_inner()).await
    {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "lectures",
                &server_config.auth_service_url,
            );
            context.insert("lecture", &data.lecture);
            if let Some(group) = &data.group {
                context.insert("group", group);
            }

            let sheet: Vec<_> = data
                .sheet
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "student": row.student,
                        "record": row.record,
                    })
                })
                .collect();
            context.insert("sheet", &sheet);

            render_template(&tera, "lectures/show.html", &context)
        }
        Err(err) => service_error_response(err, "/lectures"),
    }
}

#[post("/lectures/add")]
pub async fn add_lecture(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddLectureForm>,
) -> impl Responder {
    let back = format!("/lectures?group_id={}", form.group_id);

    match lectures_service::add_lecture(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Lecture recorded.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

#[post("/lectures/save")]
pub async fn save_lecture(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveLectureForm>,
) -> impl Responder {
    let back = format!("/lectures/{}", form.id);

    match lectures_service::save_lecture(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Lecture updated.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

#[post("/lectures/{lecture_id}/delete")]
pub async fn delete_lecture(
    lecture_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match lectures_service::delete_lecture(repo.get_ref(), &user, lecture_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Lecture removed.").send();
            redirect("/lectures")
        }
        Err(err) => service_error_response(err, "/lectures"),
    }
}

/// The attendance sheet posts one `student_id`/`status` pair per enrolled
/// student, so the body is parsed manually like the group forms.
#[post("/lectures/attendance")]
pub async fn mark_attendance(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match AttendanceForm::from_bytes(body.as_ref()) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse attendance form: {err}");
            FlashMessage::error("Form validation failed").send();
            return redirect("/lectures");
        }
    };

    let back = format!("/lectures/{}", form.lecture_id);

    match lectures_service::mark_attendance(repo.get_ref(), &user, form).await {
        Ok(saved) => {
            FlashMessage::success(format!("Attendance saved for {saved} students.")).send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

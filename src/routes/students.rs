use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::lookup::LookupKind;
use crate::dto::students::StudentsQuery;
use crate::forms::students::{AddStudentForm, SaveStudentForm, UploadStudentsForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::lookups as lookups_service;
use crate::services::students as students_service;

#[derive(Deserialize)]
struct StudentsQueryParams {
    q: Option<String>,
    page: Option<usize>,
    archived: Option<bool>,
    branch_id: Option<i32>,
}

#[get("/students")]
pub async fn show_students(
    params: web::Query<StudentsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = StudentsQuery {
        search: params.q,
        page: params.page,
        archived: params.archived.unwrap_or(false),
        branch_id: params.branch_id,
    };

    match students_service::load_students_page(repo.get_ref(), &user, query).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "students",
                &server_config.auth_service_url,
            );
            context.insert("students", &data.students);
            context.insert("archived", &data.archived);
            if let Some(search_query) = &data.search_query {
                context.insert("search_query", search_query);
            }

            // Dropdown options for the add-student form.
            for (key, kind) in [
                ("cities", LookupKind::City),
                ("areas", LookupKind::Area),
                ("qualifications", LookupKind::Qualification),
            ] {
                match lookups_service::list_options(repo.get_ref(), &user, kind).await {
                    Ok(options) => context.insert(key, &options),
                    Err(err) => {
                        log::error!("Failed to load {kind} options: {err}");
                        context.insert(key, &Vec::<crate::domain::lookup::Lookup>::new());
                    }
                }
            }

            render_template(&tera, "students/index.html", &context)
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[get("/students/{student_id}")]
pub async fn show_student(
    student_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match students_service::load_student_page(repo.get_ref(), &user, student_id.into_inner()).await
    {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "students",
                &server_config.auth_service_url,
            );
            context.insert("student", &data.student);
            context.insert("enrollments", &data.enrollments);
            context.insert("receipts", &data.receipts);

            render_template(&tera, "students/show.html", &context)
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[post("/students/add")]
pub async fn add_student(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddStudentForm>,
) -> impl Responder {
    match students_service::add_student(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Student added.").send();
            redirect("/students")
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[post("/students/save")]
pub async fn save_student(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveStudentForm>,
) -> impl Responder {
    let back = format!("/students/{}", form.id);

    match students_service::save_student(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Student updated.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

#[post("/students/{student_id}/delete")]
pub async fn delete_student(
    student_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match students_service::delete_student(repo.get_ref(), &user, student_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Student archived.").send();
            redirect("/students")
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

#[post("/students/{student_id}/restore")]
pub async fn restore_student(
    student_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match students_service::restore_student(repo.get_ref(), &user, student_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Student restored.").send();
            redirect("/students?archived=true")
        }
        Err(err) => service_error_response(err, "/students?archived=true"),
    }
}

#[post("/students/upload")]
pub async fn upload_students(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    MultipartForm(mut form): MultipartForm<UploadStudentsForm>,
) -> impl Responder {
    match students_service::upload_students(repo.get_ref(), &user, &mut form).await {
        Ok(created) => {
            FlashMessage::success(format!("{created} students imported.")).send();
            redirect("/students")
        }
        Err(err) => service_error_response(err, "/students"),
    }
}

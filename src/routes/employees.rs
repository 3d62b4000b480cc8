use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::employees::{AddEmployeeForm, SaveEmployeeForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::employees as employees_service;

#[derive(Deserialize)]
struct EmployeesQueryParams {
    q: Option<String>,
    page: Option<usize>,
    archived: Option<bool>,
}

#[get("/employees")]
pub async fn show_employees(
    params: web::Query<EmployeesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);
    let archived = params.archived.unwrap_or(false);

    match employees_service::list_employees(
        repo.get_ref(),
        &user,
        params.q.clone(),
        page,
        archived,
    )
    .await
    {
        Ok(employees) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "employees",
                &server_config.auth_service_url,
            );
            context.insert("employees", &employees);
            context.insert("archived", &archived);
            if let Some(q) = params.q.filter(|q| !q.trim().is_empty()) {
                context.insert("search_query", &q);
            }

            render_template(&tera, "employees/index.html", &context)
        }
        Err(err) => service_error_response(err, "/employees"),
    }
}

#[post("/employees/add")]
pub async fn add_employee(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddEmployeeForm>,
) -> impl Responder {
    match employees_service::add_employee(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Employee added.").send();
            redirect("/employees")
        }
        Err(err) => service_error_response(err, "/employees"),
    }
}

#[post("/employees/save")]
pub async fn save_employee(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveEmployeeForm>,
) -> impl Responder {
    match employees_service::save_employee(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Employee updated.").send();
            redirect("/employees")
        }
        Err(err) => service_error_response(err, "/employees"),
    }
}

#[post("/employees/{employee_id}/delete")]
pub async fn delete_employee(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match employees_service::delete_employee(repo.get_ref(), &user, employee_id.into_inner()).await
    {
        Ok(()) => {
            FlashMessage::success("Employee archived.").send();
            redirect("/employees")
        }
        Err(err) => service_error_response(err, "/employees"),
    }
}

#[post("/employees/{employee_id}/restore")]
pub async fn restore_employee(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match employees_service::restore_employee(repo.get_ref(), &user, employee_id.into_inner())
        .await
    {
        Ok(()) => {
            FlashMessage::success("Employee restored.").send();
            redirect("/employees?archived=true")
        }
        Err(err) => service_error_response(err, "/employees?archived=true"),
    }
}

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::messages::{AddTemplateForm, SaveTemplateForm, SendMessageForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::messages as messages_service;

#[derive(Deserialize)]
struct MessagesQueryParams {
    page: Option<usize>,
    student_id: Option<i32>,
}

#[get("/messages")]
pub async fn show_messages(
    params: web::Query<MessagesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);

    match messages_service::list_messages(repo.get_ref(), &user, params.student_id, page).await {
        Ok(messages) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "messages",
                &server_config.auth_service_url,
            );
            context.insert("messages", &messages);

            render_template(&tera, "messages/index.html", &context)
        }
        Err(err) => service_error_response(err, "/messages"),
    }
}

#[derive(Deserialize)]
struct TemplatesQueryParams {
    page: Option<usize>,
}

#[get("/messages/templates")]
pub async fn show_templates(
    params: web::Query<TemplatesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.unwrap_or(1);

    match messages_service::list_templates(repo.get_ref(), &user, page).await {
        Ok(templates) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "messages",
                &server_config.auth_service_url,
            );
            context.insert("templates", &templates);

            render_template(&tera, "messages/templates.html", &context)
        }
        Err(err) => service_error_response(err, "/messages"),
    }
}

#[post("/messages/templates/add")]
pub async fn add_template(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddTemplateForm>,
) -> impl Responder {
    match messages_service::add_template(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Template added.").send();
            redirect("/messages/templates")
        }
        Err(err) => service_error_response(err, "/messages/templates"),
    }
}

#[post("/messages/templates/save")]
pub async fn save_template(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveTemplateForm>,
) -> impl Responder {
    match messages_service::save_template(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Template updated.").send();
            redirect("/messages/templates")
        }
        Err(err) => service_error_response(err, "/messages/templates"),
    }
}

#[post("/messages/templates/{template_id}/delete")]
pub async fn delete_template(
    template_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match messages_service::delete_template(repo.get_ref(), &user, template_id.into_inner()).await
    {
        Ok(()) => {
            FlashMessage::success("Template archived.").send();
            redirect("/messages/templates")
        }
        Err(err) => service_error_response(err, "/messages/templates"),
    }
}

#[post("/messages/templates/{template_id}/restore")]
pub async fn restore_template(
    template_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match messages_service::restore_template(repo.get_ref(), &user, template_id.into_inner()).await
    {
        Ok(()) => {
            FlashMessage::success("Template restored.").send();
            redirect("/messages/templates")
        }
        Err(err) => service_error_response(err, "/messages/templates"),
    }
}

#[post("/messages/send")]
pub async fn send_message(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SendMessageForm>,
) -> impl Responder {
    match messages_service::send_message(repo.get_ref(), &user, form).await {
        Ok(queued) => {
            FlashMessage::success(format!("{queued} messages queued.")).send();
            redirect("/messages")
        }
        Err(err) => service_error_response(err, "/messages"),
    }
}

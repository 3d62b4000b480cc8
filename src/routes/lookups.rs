use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::lookup::LookupKind;
use crate::forms::lookups::{AddLookupForm, SaveLookupForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::lookups as lookups_service;

fn lookups_url(kind: LookupKind) -> String {
    format!("/settings/lookups/{kind}")
}

#[derive(Deserialize)]
struct LookupsQueryParams {
    page: Option<usize>,
    archived: Option<bool>,
}

#[get("/settings/lookups/{kind}")]
pub async fn show_lookups(
    kind: web::Path<String>,
    params: web::Query<LookupsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(kind) = LookupKind::try_from(kind.as_str()) else {
        FlashMessage::error("Unknown lookup type.").send();
        return redirect("/");
    };

    let page = params.page.unwrap_or(1);
    let archived = params.archived.unwrap_or(false);

    match lookups_service::list_lookups(repo.get_ref(), &user, kind, page, archived).await {
        Ok(lookups) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("lookups", &lookups);
            context.insert("kind", &kind.to_string());
            context.insert("archived", &archived);

            render_template(&tera, "lookups/index.html", &context)
        }
        Err(err) => service_error_response(err, &lookups_url(kind)),
    }
}

#[post("/settings/lookups/add")]
pub async fn add_lookup(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddLookupForm>,
) -> impl Responder {
    match lookups_service::add_lookup(repo.get_ref(), &user, form).await {
        Ok(kind) => {
            FlashMessage::success("Entry added.").send();
            redirect(&lookups_url(kind))
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/settings/lookups/save")]
pub async fn save_lookup(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveLookupForm>,
) -> impl Responder {
    match lookups_service::save_lookup(repo.get_ref(), &user, form).await {
        Ok(kind) => {
            FlashMessage::success("Entry updated.").send();
            redirect(&lookups_url(kind))
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[derive(Deserialize)]
struct LookupActionForm {
    id: i32,
    kind: String,
}

#[post("/settings/lookups/delete")]
pub async fn delete_lookup(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<LookupActionForm>,
) -> impl Responder {
    let Ok(kind) = LookupKind::try_from(form.kind.as_str()) else {
        FlashMessage::error("Unknown lookup type.").send();
        return redirect("/");
    };

    match lookups_service::delete_lookup(repo.get_ref(), &user, form.id, kind).await {
        Ok(()) => {
            FlashMessage::success("Entry archived.").send();
            redirect(&lookups_url(kind))
        }
        Err(err) => service_error_response(err, &lookups_url(kind)),
    }
}

#[post("/settings/lookups/restore")]
pub async fn restore_lookup(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<LookupActionForm>,
) -> impl Responder {
    let Ok(kind) = LookupKind::try_from(form.kind.as_str()) else {
        FlashMessage::error("Unknown lookup type.").send();
        return redirect("/");
    };

    match lookups_service::restore_lookup(repo.get_ref(), &user, form.id, kind).await {
        Ok(()) => {
            FlashMessage::success("Entry restored.").send();
            redirect(&lookups_url(kind))
        }
        Err(err) => service_error_response(err, &lookups_url(kind)),
    }
}

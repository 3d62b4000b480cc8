//! Route handlers and the template/flash helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod api;
pub mod branches;
pub mod course_groups;
pub mod courses;
pub mod employees;
pub mod lectures;
pub mod lecturers;
pub mod lookups;
pub mod main;
pub mod messages;
pub mod receipts;
pub mod schedule;
pub mod students;

/// Maps a flash message level onto the CSS alert class used by templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders a template or logs and returns 500.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template {name}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Seeds the template context every page shares: alerts, the signed-in user,
/// the active navigation item and the auth-service home link.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

/// Shared translation of service failures into a flashed redirect.
pub fn service_error_response(err: ServiceError, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        ServiceError::NotFound => {
            FlashMessage::error("Record not found.").send();
            redirect(back)
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        err => {
            log::error!("Service call failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

use actix_web::{Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::schedule as schedule_service;

#[derive(Deserialize)]
struct ScheduleQueryParams {
    /// Any date inside the week to display.
    date: Option<String>,
}

#[get("/schedule")]
pub async fn show_schedule(
    params: web::Query<ScheduleQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let reference = match &params.date {
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                FlashMessage::error("Invalid date.").send();
                return redirect("/schedule");
            }
        },
        None => Utc::now().date_naive(),
    };

    match schedule_service::load_week_view(repo.get_ref(), &user, reference).await {
        Ok(week) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "schedule",
                &server_config.auth_service_url,
            );
            context.insert("week", &week);
            context.insert(
                "prev_week",
                &(week.week_start - Duration::days(7))
                    .format("%Y-%m-%d")
                    .to_string(),
            );
            context.insert(
                "next_week",
                &(week.week_start + Duration::days(7))
                    .format("%Y-%m-%d")
                    .to_string(),
            );

            render_template(&tera, "schedule/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

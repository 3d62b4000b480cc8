use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::dto::receipts::ReceiptsQuery;
use crate::forms::receipts::AddReceiptForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::receipts as receipts_service;

#[derive(Deserialize)]
struct ReceiptsQueryParams {
    q: Option<String>,
    page: Option<usize>,
    student_id: Option<i32>,
    kind: Option<String>,
    issued_from: Option<String>,
    issued_to: Option<String>,
}

#[get("/receipts")]
pub async fn show_receipts(
    params: web::Query<ReceiptsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = ReceiptsQuery {
        search: params.q,
        page: params.page,
        student_id: params.student_id,
        kind: params.kind,
        issued_from: params.issued_from,
        issued_to: params.issued_to,
    };

    match receipts_service::load_receipts_page(repo.get_ref(), &user, query).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "receipts",
                &server_config.auth_service_url,
            );
            context.insert("receipts", &data.receipts);
            context.insert("payments_minor", &data.totals.payments_minor);
            context.insert("charges_minor", &data.totals.charges_minor);
            context.insert("refunds_minor", &data.totals.refunds_minor);
            if let Some(search_query) = &data.search_query {
                context.insert("search_query", search_query);
            }

            render_template(&tera, "receipts/index.html", &context)
        }
        Err(err) => service_error_response(err, "/receipts"),
    }
}

#[post("/receipts/add")]
pub async fn add_receipt(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddReceiptForm>,
) -> impl Responder {
    match receipts_service::add_receipt(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Receipt issued.").send();
            redirect("/receipts")
        }
        Err(err) => service_error_response(err, "/receipts"),
    }
}

#[post("/receipts/{receipt_id}/void")]
pub async fn void_receipt(
    receipt_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match receipts_service::void_receipt(repo.get_ref(), &user, receipt_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Receipt voided.").send();
            redirect("/receipts")
        }
        Err(err) => service_error_response(err, "/receipts"),
    }
}

#[post("/receipts/{receipt_id}/restore")]
pub async fn restore_receipt(
    receipt_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match receipts_service::restore_receipt(repo.get_ref(), &user, receipt_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Receipt restored.").send();
            redirect("/receipts")
        }
        Err(err) => service_error_response(err, "/receipts"),
    }
}

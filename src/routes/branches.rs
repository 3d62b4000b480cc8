use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::branches::{AddBranchForm, AddLabForm, SaveBranchForm, SaveLabForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::branches as branches_service;

#[derive(Deserialize)]
struct BranchesQueryParams {
    q: Option<String>,
    page: Option<usize>,
    archived: Option<bool>,
}

#[get("/branches")]
pub async fn show_branches(
    params: web::Query<BranchesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);
    let archived = params.archived.unwrap_or(false);

    match branches_service::list_branches(repo.get_ref(), &user, params.q.clone(), page, archived)
        .await
    {
        Ok(branches) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "branches",
                &server_config.auth_service_url,
            );
            context.insert("branches", &branches);
            context.insert("archived", &archived);
            if let Some(q) = params.q.filter(|q| !q.trim().is_empty()) {
                context.insert("search_query", &q);
            }

            render_template(&tera, "branches/index.html", &context)
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

#[get("/branches/{branch_id}")]
pub async fn show_branch(
    branch_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match branches_service::load_branch_page(repo.get_ref(), &user, branch_id.into_inner()).await {
        Ok((branch, labs)) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "branches",
                &server_config.auth_service_url,
            );
            context.insert("branch", &branch);
            context.insert("labs", &labs);

            render_template(&tera, "branches/show.html", &context)
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

#[post("/branches/add")]
pub async fn add_branch(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddBranchForm>,
) -> impl Responder {
    match branches_service::add_branch(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Branch added.").send();
            redirect("/branches")
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

#[post("/branches/save")]
pub async fn save_branch(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveBranchForm>,
) -> impl Responder {
    let back = format!("/branches/{}", form.id);

    match branches_service::save_branch(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Branch updated.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

#[post("/branches/{branch_id}/delete")]
pub async fn delete_branch(
    branch_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match branches_service::delete_branch(repo.get_ref(), &user, branch_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Branch archived.").send();
            redirect("/branches")
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

#[post("/branches/{branch_id}/restore")]
pub async fn restore_branch(
    branch_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match branches_service::restore_branch(repo.get_ref(), &user, branch_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Branch restored.").send();
            redirect("/branches?archived=true")
        }
        Err(err) => service_error_response(err, "/branches?archived=true"),
    }
}

#[post("/labs/add")]
pub async fn add_lab(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<AddLabForm>,
) -> impl Responder {
    let back = format!("/branches/{}", form.branch_id);

    match branches_service::add_lab(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Lab added.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

#[post("/labs/save")]
pub async fn save_lab(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<SaveLabForm>,
) -> impl Responder {
    let back = format!("/branches/{}", form.branch_id);

    match branches_service::save_lab(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Lab updated.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(err, &back),
    }
}

#[post("/labs/{lab_id}/delete")]
pub async fn delete_lab(
    lab_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match branches_service::delete_lab(repo.get_ref(), &user, lab_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Lab archived.").send();
            redirect("/branches")
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

#[post("/labs/{lab_id}/restore")]
pub async fn restore_lab(
    lab_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match branches_service::restore_lab(repo.get_ref(), &user, lab_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Lab restored.").send();
            redirect("/branches")
        }
        Err(err) => service_error_response(err, "/branches"),
    }
}

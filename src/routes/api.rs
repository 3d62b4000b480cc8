use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::models::auth::AuthenticatedUser;
use crate::dto::students::StudentsQuery;
use crate::repository::RestRepository;
use crate::services::students as students_service;

#[derive(Deserialize)]
struct ApiV1StudentsQueryParams {
    query: String,
    page: Option<usize>,
}

/// Read-only student search used by typeahead widgets.
#[get("/v1/students")]
pub async fn api_v1_students(
    params: web::Query<ApiV1StudentsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    let query = StudentsQuery {
        search: Some(params.query.clone()),
        page: params.page,
        archived: false,
        branch_id: None,
    };

    match students_service::load_students_page(repo.get_ref(), &user, query).await {
        Ok(data) => HttpResponse::Ok().json(data.students.items),
        Err(e) => {
            log::error!("Failed to list students: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

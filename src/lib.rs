#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod pagination;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Role required to open any page of the service.
pub const SERVICE_ACCESS_ROLE: &str = "academy";
/// Role required for every mutation.
pub const SERVICE_ADMIN_ROLE: &str = "academy_admin";

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware as actix_middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::{ApiClient, RestRepository};
    use crate::routes::api::api_v1_students;
    use crate::routes::branches::{
        add_branch, add_lab, delete_branch, delete_lab, restore_branch, restore_lab, save_branch,
        save_lab, show_branch, show_branches,
    };
    use crate::routes::course_groups::{
        add_group, delete_group, enroll_student, restore_group, save_group, show_group,
        show_groups, unenroll_student,
    };
    use crate::routes::courses::{
        add_course, delete_course, restore_course, save_course, show_courses,
    };
    use crate::routes::employees::{
        add_employee, delete_employee, restore_employee, save_employee, show_employees,
    };
    use crate::routes::lectures::{
        add_lecture, delete_lecture, mark_attendance, save_lecture, show_lecture, show_lectures,
    };
    use crate::routes::lecturers::{
        add_lecturer, delete_lecturer, restore_lecturer, save_lecturer, show_lecturers,
    };
    use crate::routes::lookups::{
        add_lookup, delete_lookup, restore_lookup, save_lookup, show_lookups,
    };
    use crate::routes::main::{logout, not_assigned, show_index};
    use crate::routes::messages::{
        add_template, delete_template, restore_template, save_template, send_message,
        show_messages, show_templates,
    };
    use crate::routes::receipts::{add_receipt, restore_receipt, show_receipts, void_receipt};
    use crate::routes::schedule::show_schedule;
    use crate::routes::students::{
        add_student, delete_student, restore_student, save_student, show_student, show_students,
        upload_students,
    };

    /// Builds and runs the Actix-Web HTTP server using the provided
    /// configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Shared HTTP client for the backend REST API.
        let api = ApiClient::new(&server_config.backend_url, &server_config.backend_token)
            .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
        let repo = RestRepository::new(api);

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(actix_middleware::Compress::default())
                .wrap(actix_middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(web::scope("/api").service(api_v1_students))
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_index)
                        .service(not_assigned)
                        .service(logout)
                        .service(show_students)
                        .service(add_student)
                        .service(save_student)
                        .service(upload_students)
                        .service(delete_student)
                        .service(restore_student)
                        .service(show_student)
                        .service(show_lecturers)
                        .service(add_lecturer)
                        .service(save_lecturer)
                        .service(delete_lecturer)
                        .service(restore_lecturer)
                        .service(show_employees)
                        .service(add_employee)
                        .service(save_employee)
                        .service(delete_employee)
                        .service(restore_employee)
                        .service(show_courses)
                        .service(add_course)
                        .service(save_course)
                        .service(delete_course)
                        .service(restore_course)
                        .service(show_branches)
                        .service(add_branch)
                        .service(save_branch)
                        .service(delete_branch)
                        .service(restore_branch)
                        .service(show_branch)
                        .service(add_lab)
                        .service(save_lab)
                        .service(delete_lab)
                        .service(restore_lab)
                        .service(show_groups)
                        .service(add_group)
                        .service(save_group)
                        .service(enroll_student)
                        .service(unenroll_student)
                        .service(delete_group)
                        .service(restore_group)
                        .service(show_group)
                        .service(show_lectures)
                        .service(add_lecture)
                        .service(save_lecture)
                        .service(mark_attendance)
                        .service(delete_lecture)
                        .service(show_lecture)
                        .service(show_receipts)
                        .service(add_receipt)
                        .service(void_receipt)
                        .service(restore_receipt)
                        .service(show_messages)
                        .service(show_templates)
                        .service(add_template)
                        .service(save_template)
                        .service(delete_template)
                        .service(restore_template)
                        .service(send_message)
                        .service(show_lookups)
                        .service(add_lookup)
                        .service(save_lookup)
                        .service(delete_lookup)
                        .service(restore_lookup)
                        .service(show_schedule),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

#[cfg(feature = "server")]
pub use server::run;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::contact::{
    create_contact, delete_contact, export_contacts, get_contact, list_contacts, update_contact,
};

pub mod db;
pub mod domain;
pub mod dto;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .service(
                web::scope("/api/contacts")
                    // registered before `/{id}` so the literal segment wins
                    .service(export_contacts)
                    .service(list_contacts)
                    .service(get_contact)
                    .service(create_contact)
                    .service(update_contact)
                    .service(delete_contact),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}

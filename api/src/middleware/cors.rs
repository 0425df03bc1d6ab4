//! CORS middleware configuration for the reservation form.
//!
//! Development is permissive. Production admits only the origins listed in
//! `ALLOWED_ORIGINS`, or any origin when that list is empty.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use pr_shared::{Environment, ServerConfig};

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_production() && !server.allowed_origins.is_empty() {
        create_production_cors(&server.allowed_origins)
    } else {
        create_permissive_cors()
    }
}

fn create_permissive_cors() -> Cors {
    tracing::info!("Configuring permissive CORS");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(3600)
}

fn create_production_cors(allowed_origins: &[String]) -> Cors {
    tracing::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    for origin in allowed_origins {
        tracing::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

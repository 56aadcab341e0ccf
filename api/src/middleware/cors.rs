//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header::HeaderName, Method};
use rg_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// Origins, methods and headers that do not parse are skipped with a
/// warning. A `*` origin allows any origin while still echoing it back, so
/// credentials keep working.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| match Method::from_bytes(m.as_bytes()) {
            Ok(method) => Some(method),
            Err(_) => {
                log::warn!("Ignoring invalid CORS method {}", m);
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| match HeaderName::from_bytes(h.as_bytes()) {
            Ok(header) => Some(header),
            Err(_) => {
                log::warn!("Ignoring invalid CORS header {}", h);
                None
            }
        })
        .collect();

    cors = cors
        .allowed_methods(methods)
        .allowed_headers(headers)
        .max_age(config.max_age);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

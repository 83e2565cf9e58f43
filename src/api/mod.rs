pub mod analyze;
pub mod error;
pub mod health;
pub mod openapi;

pub use error::{ApiError, ErrorResponse};

use actix_web::web;

/// Register every HTTP route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(analyze::configure)
        .configure(health::configure)
        .configure(openapi::configure);
}

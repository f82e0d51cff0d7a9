// Route exports
pub mod discover;
pub mod sessions;

use crate::services::{DirectoryClient, GeocoderClient, SessionStore};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub geocoder: Arc<GeocoderClient>,
    pub sessions: Arc<SessionStore>,
    pub jwt_secret: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(discover::configure)
            .configure(sessions::configure),
    );
}

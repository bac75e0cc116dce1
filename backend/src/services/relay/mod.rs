//! Same-origin relay for the hosted workflow service.
//!
//! The browser never talks to the external service directly: it posts
//! multipart form data to one local endpoint, and the relay forwards the
//! request with the bearer credential attached.
//!
//! The provided route is:
//! - `POST /api/comfyui`: expects an `action` field (`upload`, `prompt`,
//!   `status` or `view`) plus the action-specific field (`image`, `inputs`,
//!   `promptId`, `filename`). The upstream JSON body is returned verbatim;
//!   errors come back as `{"error": ...}` with 400 (bad request) or 500
//!   (upstream failure).

use actix_web::web::{post, scope};
use actix_web::Scope;

pub mod client;
mod forward;

const API_PATH: &str = "/api/comfyui";

/// Configures and returns the Actix scope for the relay route.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(forward::process))
}

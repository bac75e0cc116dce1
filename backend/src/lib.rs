//! Same-origin relay server for the hosted image-processing workflow
//! service.
//!
//! Serves the embedded browser front end and a single `POST /api/comfyui`
//! endpoint that forwards `upload` / `prompt` / `status` / `view` actions
//! to the external service, attaching the bearer credential so it never
//! reaches the browser.

pub mod config;
pub mod services;

//! HTTP API layer for lawhear.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: citizen voting/survey actions and admin views
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: auth resolution, logging, CORS
//! - **CAPTCHA**: external verification gate for citizen submissions
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod captcha;
pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use captcha::CaptchaVerifier;
pub use endpoints::router;

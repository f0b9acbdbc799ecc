//! HTTP gateway for the Warren URL shortener.
//!
//! Exposes the shortener and redirector services over axum:
//!
//! * `POST /` creates a short code from `{"originalUrl", "expirationTime"}`
//! * `GET /{code}` redirects (302), reports expiry (410) or not found (404)
//! * `GET /health` is a liveness probe

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;

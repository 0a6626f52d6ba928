//! Formbox: a small contact-form web service.
//!
//! The application accepts contact form submissions (email, name, mobile
//! number) over HTTP, validates them, persists them to MongoDB, and serves
//! HTML pages for submitting, listing, viewing, and deleting entries.
//!
//! Layering, leaves first:
//!
//! - [`store`] — the `EntryStore` trait and its MongoDB and in-memory
//!   implementations
//! - [`forms`] — field-level validation of raw form input
//! - [`render`] — Tera-backed HTML rendering over a closed template set
//! - [`http`] / [`routing`] / [`server`] — request/response types, the
//!   method+path router, and the hyper accept loop
//! - [`handlers`] — one handler per route, wired together by
//!   [`handlers::app_router`]

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod http;
pub mod models;
pub mod render;
pub mod routing;
pub mod server;
pub mod static_files;
pub mod store;

pub use config::AppConfig;
pub use error::{Error, Result};

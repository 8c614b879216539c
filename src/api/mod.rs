//! HTTP surface: the form page, the JSON prediction endpoint, and the
//! server lifecycle.
//!
//! `app_router()` returns a `Router` that can be mounted on any axum
//! server instance; `start_server()` binds it and runs it in the background.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::app_router;
pub use server::{start_server, FormServer};
pub use types::AppContext;

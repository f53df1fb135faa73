//! matsel-server: JSON-over-HTTP front end for a trained material bundle.
//!
//! The bundle is loaded once into an [`state::AppState`] that every request
//! shares read-only; handlers never mutate it, so no locking is involved.
pub mod config;
pub mod error;
pub mod payload;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

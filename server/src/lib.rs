//! billdesk-server — HTTP JSON surface over billdesk-core.

pub mod api_error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, SharedState};

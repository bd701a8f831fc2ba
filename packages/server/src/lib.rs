pub mod api;
pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod routes;
pub mod state;
pub mod weather;

pub use crate::auth::SessionService;
pub use crate::config::ServerConfig;
pub use crate::state::AppState;

pub mod errors;
pub mod handlers;
pub mod healthcheck;
pub mod models;
pub mod router;
pub mod state;

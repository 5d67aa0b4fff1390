pub mod anthropic;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;

pub use state::AppState;

//! Spendwise Server
//!
//! HTTP API for recording expenses. Expenses without a category are
//! categorized by the fitted [`spendwise_classifiers::ExpenseCategorizer`]
//! before they are stored.

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;

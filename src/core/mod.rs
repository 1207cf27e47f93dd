pub mod config;
pub mod error;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, FetchError};
pub use state::AppState;

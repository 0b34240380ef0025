pub mod app;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use app::config::{Config, SecretKey};
pub use app::{router, AppState};
pub use error::{GatewayError, RelayError};

pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod shutdown;

pub use db::Database;
pub use error::ApiError;
pub use routes::{app, AppState};

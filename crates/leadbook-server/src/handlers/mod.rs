pub mod agents;
pub mod comments;
pub mod leads;
pub mod reports;
pub mod tags;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub mod accounts;
pub mod chat;
pub mod fixtures;
pub mod followers;
pub mod health;
pub mod leaderboard;
pub mod metrics;
pub mod sports;
pub mod tips;

use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

pub mod in_memory;

use crate::core::errors::YearoutError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

/// Application-wide audit trail of user actions.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), YearoutError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, YearoutError>;
}

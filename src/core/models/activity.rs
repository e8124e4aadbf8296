use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A recorded result from a trip activity, e.g. a top speed or a race win count.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityResult {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub metric: String,
    /// Kept as text; its meaning depends on the metric.
    pub value: String,
    pub unit: Option<String>,
    #[schema(value_type = Option<String>, example = "2025-05-02")]
    pub day: Option<NaiveDate>,
    #[schema(value_type = String, example = "2025-05-02T18:00:00Z")]
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A purchase logged against an event. Amounts are in cents.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub event_id: String,
    pub paid_by: String,
    pub description: String,
    pub amount_cents: i64,
    #[schema(value_type = String, example = "2025-02-01T18:30:00Z")]
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoreKind {
    Memory,
    Checkin,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoreEntry {
    pub id: String,
    pub event_id: String,
    pub author_id: String,
    pub kind: LoreKind,
    pub content: String,
    pub location: Option<String>,
    pub is_hall_of_fame: bool,
    #[schema(value_type = String, example = "2025-02-01T18:30:00Z")]
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    Mvp,
    Lup,
    RunnerUp,
    Custom,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardDefinition {
    pub id: String,
    pub ritual_id: String,
    pub name: String,
    pub label: String,
    pub kind: AwardKind,
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardVote {
    pub id: String,
    pub event_id: String,
    pub award_definition_id: String,
    pub voter_id: String,
    pub nominee_id: String,
    /// Only used to break ties when tallying.
    #[schema(value_type = String, example = "2025-02-03T09:00:00Z")]
    pub created_at: DateTime<Utc>,
}

/// The decided winner of one award at one event.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Award {
    pub id: String,
    pub event_id: String,
    pub award_definition_id: String,
    pub winner_id: String,
    #[schema(value_type = String, example = "2025-02-04T09:00:00Z")]
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewRole {
    Sponsor,
    Organizer,
    CrewMember,
}

impl std::fmt::Display for CrewRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CrewRole::Sponsor => "sponsor",
            CrewRole::Organizer => "organizer",
            CrewRole::CrewMember => "crew_member",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RitualMember {
    pub user_id: String,
    pub role: CrewRole,
    pub is_core_crew: bool,
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub joined_at: DateTime<Utc>,
}

impl RitualMember {
    pub fn is_sponsor(&self) -> bool {
        self.role == CrewRole::Sponsor
    }
}

/// A community that runs the same trip every year.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Ritual {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sponsor_id: String,
    pub invite_token: String,
    pub tagline: Option<String>,
    pub members: Vec<RitualMember>,
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl Ritual {
    pub fn member(&self, user_id: &str) -> Option<&RitualMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}

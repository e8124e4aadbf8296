use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planning,
    Scheduled,
    InProgress,
    Closed,
}

impl EventStatus {
    /// Events only ever move one step forward.
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Planning, EventStatus::Scheduled)
                | (EventStatus::Scheduled, EventStatus::InProgress)
                | (EventStatus::InProgress, EventStatus::Closed)
        )
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventStatus::Planning => "planning",
            EventStatus::Scheduled => "scheduled",
            EventStatus::InProgress => "in_progress",
            EventStatus::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}

/// One year's trip of a ritual.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub ritual_id: String,
    pub organizer_id: Option<String>,
    pub name: String,
    pub year: i32,
    pub location: Option<String>,
    pub status: EventStatus,
    #[schema(value_type = Option<String>, example = "2025-02-01T12:00:00Z")]
    pub sealed_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_sealed(&self) -> bool {
        self.sealed_at.is_some()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Proposal {
    pub id: String,
    pub event_id: String,
    pub proposed_by: String,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Yes,
    No,
    Maybe,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProposalVote {
    pub id: String,
    pub proposal_id: String,
    pub user_id: String,
    pub choice: VoteChoice,
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProposalSummary {
    pub proposal: Proposal,
    pub yes: usize,
    pub no: usize,
    pub maybe: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    NotYet,
    Committed,
    FlightsBooked,
    AllBooked,
    Out,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Attendee {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub booking_status: BookingStatus,
    #[schema(value_type = Option<String>, example = "2025-01-20T12:00:00Z")]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Attendee {
    /// Opted-out attendees do not share costs.
    pub fn shares_costs(&self) -> bool {
        self.booking_status != BookingStatus::Out
    }
}

/// A trip entered in one step, skipping proposals. Used to backfill past years.
#[derive(Clone, Debug)]
pub struct QuickEntry {
    pub name: String,
    pub year: i32,
    pub location: String,
    pub organizer_id: String,
    pub status: EventStatus,
    /// Winners are only recorded when `status` is closed.
    pub mvp_winner_id: Option<String>,
    pub lup_winner_id: Option<String>,
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::{
    errors::YearoutError,
    models::{
        award::AwardKind,
        event::{BookingStatus, EventStatus, QuickEntry, VoteChoice},
        lore::LoreKind,
    },
};

// Request structs for JSON payloads. The caller is always taken from the bearer token.
#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateRitualRequest {
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    /// Optional custom names for the default MVP and LUP awards, in that order.
    #[serde(default)]
    pub award_names: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct JoinRitualRequest {
    pub invite_token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddAwardDefinitionRequest {
    pub name: String,
    pub label: String,
    pub kind: AwardKind,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub name: String,
    pub year: i32,
    pub location: Option<String>,
    pub proposed_dates: Option<String>,
}

/// Backfills a trip without going through proposals.
#[derive(Deserialize, ToSchema)]
pub struct QuickEnterEventRequest {
    pub name: String,
    pub year: i32,
    pub location: String,
    pub organizer_id: String,
    /// `scheduled`, `in_progress` or `closed`. Closed entries are sealed at once.
    pub status: EventStatus,
    pub mvp_winner_id: Option<String>,
    pub lup_winner_id: Option<String>,
}

impl From<QuickEnterEventRequest> for QuickEntry {
    fn from(req: QuickEnterEventRequest) -> Self {
        QuickEntry {
            name: req.name,
            year: req.year,
            location: req.location,
            organizer_id: req.organizer_id,
            status: req.status,
            mvp_winner_id: req.mvp_winner_id,
            lup_winner_id: req.lup_winner_id,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AddProposalRequest {
    pub dates: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ProposalVoteRequest {
    pub choice: VoteChoice,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize, ToSchema)]
pub struct AdvanceStatusRequest {
    pub status: EventStatus,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub description: String,
    /// Whole cents, 1 to 100,000,000.
    pub amount_cents: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct AddLoreRequest {
    pub kind: LoreKind,
    pub content: String,
    pub location: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddActivityResultRequest {
    /// Defaults to the caller. Only sponsors may record results for someone else.
    pub user_id: Option<String>,
    pub metric: String,
    pub value: String,
    pub unit: Option<String>,
    #[schema(value_type = Option<String>, example = "2025-05-02")]
    pub day: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct CastAwardVoteRequest {
    pub award_definition_id: String,
    pub nominee_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetAwardWinnerRequest {
    pub award_definition_id: String,
    pub winner_id: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Stable machine-readable code, e.g. `vote-cap-exceeded`.
    pub reason: String,
}

// Newtype wrapper for YearoutError to implement IntoResponse
pub struct ApiError(pub YearoutError);

impl From<YearoutError> for ApiError {
    fn from(err: YearoutError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            YearoutError::MissingEmail
            | YearoutError::InvalidEmail(_)
            | YearoutError::InvalidInput(..)
            | YearoutError::SelfVote
            | YearoutError::NomineeNotAttendee(_) => StatusCode::BAD_REQUEST,
            YearoutError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            YearoutError::NotRitualMember(_) | YearoutError::NotAuthorized(..) => StatusCode::FORBIDDEN,
            YearoutError::UserNotFound(_)
            | YearoutError::RitualNotFound(_)
            | YearoutError::InviteNotFound
            | YearoutError::EventNotFound(_)
            | YearoutError::ProposalNotFound(_)
            | YearoutError::ExpenseNotFound(_)
            | YearoutError::LoreEntryNotFound(_)
            | YearoutError::AwardDefinitionNotFound(_)
            | YearoutError::AwardVoteNotFound(_) => StatusCode::NOT_FOUND,
            YearoutError::EmailAlreadyRegistered(_)
            | YearoutError::InvalidStatusTransition { .. }
            | YearoutError::EventSealed(_)
            | YearoutError::DuplicateVote(_)
            | YearoutError::VoteCapExceeded(_) => StatusCode::CONFLICT,
            YearoutError::InternalServerError(_) | YearoutError::StorageError(_) | YearoutError::LoggingError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
            reason: self.0.reason().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

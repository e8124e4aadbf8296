use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum YearoutError {
    /// Email field is empty
    #[error("Email is required")]
    MissingEmail,

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Email is already registered
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Ritual with given ID or slug not found
    #[error("Ritual {0} not found")]
    RitualNotFound(String),

    /// Invite token does not belong to any ritual
    #[error("Invalid invite link")]
    InviteNotFound,

    /// User is not a member of the ritual
    #[error("User {0} is not a ritual member")]
    NotRitualMember(String),

    /// Caller lacks the role required for the operation
    #[error("User {0} is not authorized: {1}")]
    NotAuthorized(String, String),

    /// Event with given ID not found
    #[error("Event {0} not found")]
    EventNotFound(String),

    /// Event cannot move from its current status to the requested one
    #[error("Event cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Event has been sealed and no longer accepts writes
    #[error("Event {0} is sealed")]
    EventSealed(String),

    /// Proposal with given ID not found
    #[error("Proposal {0} not found")]
    ProposalNotFound(String),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// Lore entry with given ID not found
    #[error("Lore entry {0} not found")]
    LoreEntryNotFound(String),

    /// Award definition is unknown or belongs to another ritual
    #[error("Award definition {0} not found")]
    AwardDefinitionNotFound(String),

    /// Award vote with given ID not found
    #[error("Award vote {0} not found")]
    AwardVoteNotFound(String),

    /// Voter nominated themselves
    #[error("Cannot vote for yourself")]
    SelfVote,

    /// Voter already holds a vote for this nominee
    #[error("Already voted for nominee {0}")]
    DuplicateVote(String),

    /// Voter already holds the maximum number of votes for the award
    #[error("Maximum {0} votes per award")]
    VoteCapExceeded(usize),

    /// Nominee is not an attendee of the event
    #[error("Nominee {0} is not an event attendee")]
    NomineeNotAttendee(String),

    /// Bearer token missing, malformed or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl YearoutError {
    /// Stable code naming the violated invariant, for user-facing messaging.
    pub fn reason(&self) -> &'static str {
        match self {
            YearoutError::MissingEmail | YearoutError::InvalidEmail(_) | YearoutError::InvalidInput(..) => {
                "invalid-input"
            }
            YearoutError::EmailAlreadyRegistered(_) => "already-registered",
            YearoutError::UserNotFound(_)
            | YearoutError::RitualNotFound(_)
            | YearoutError::InviteNotFound
            | YearoutError::EventNotFound(_)
            | YearoutError::ProposalNotFound(_)
            | YearoutError::ExpenseNotFound(_)
            | YearoutError::LoreEntryNotFound(_)
            | YearoutError::AwardDefinitionNotFound(_)
            | YearoutError::AwardVoteNotFound(_) => "not-found",
            YearoutError::NotRitualMember(_) => "not-a-member",
            YearoutError::NotAuthorized(..) => "not-authorized",
            YearoutError::InvalidStatusTransition { .. } => "invalid-status-transition",
            YearoutError::EventSealed(_) => "event-sealed",
            YearoutError::SelfVote => "self-vote",
            YearoutError::DuplicateVote(_) => "duplicate-vote",
            YearoutError::VoteCapExceeded(_) => "vote-cap-exceeded",
            YearoutError::NomineeNotAttendee(_) => "nominee-not-attendee",
            YearoutError::Unauthorized(_) => "unauthenticated",
            YearoutError::InternalServerError(_) | YearoutError::StorageError(_) | YearoutError::LoggingError(_) => {
                "internal"
            }
        }
    }
}

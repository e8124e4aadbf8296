/// Votes a single voter may hold for one award at one event.
pub const MAX_VOTES_PER_AWARD: usize = 2;

pub const MAX_EXPENSE_CENTS: i64 = 100_000_000;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_LORE_LENGTH: usize = 2_000;

/// Token role allowed to read the application log.
pub const ADMIN_ROLE: &str = "ADMIN";

// Audit actions
pub const USER_ADDED: &str = "USER_ADDED";
pub const RITUAL_CREATED: &str = "RITUAL_CREATED";
pub const RITUAL_JOINED: &str = "RITUAL_JOINED";
pub const AWARD_DEFINED: &str = "AWARD_DEFINED";
pub const EVENT_CREATED: &str = "EVENT_CREATED";
pub const EVENT_QUICK_ENTERED: &str = "EVENT_QUICK_ENTERED";
pub const PROPOSAL_ADDED: &str = "PROPOSAL_ADDED";
pub const PROPOSAL_VOTED: &str = "PROPOSAL_VOTED";
pub const PROPOSAL_LOCKED: &str = "PROPOSAL_LOCKED";
pub const PROPOSAL_DELETED: &str = "PROPOSAL_DELETED";
pub const BOOKING_STATUS_UPDATED: &str = "BOOKING_STATUS_UPDATED";
pub const EVENT_STATUS_ADVANCED: &str = "EVENT_STATUS_ADVANCED";
pub const EVENT_SEALED: &str = "EVENT_SEALED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_DELETED: &str = "EXPENSE_DELETED";
pub const LORE_ADDED: &str = "LORE_ADDED";
pub const LORE_HALL_OF_FAME_TOGGLED: &str = "LORE_HALL_OF_FAME_TOGGLED";
pub const ACTIVITY_RESULT_ADDED: &str = "ACTIVITY_RESULT_ADDED";
pub const AWARD_VOTE_CAST: &str = "AWARD_VOTE_CAST";
pub const AWARD_VOTE_RETRACTED: &str = "AWARD_VOTE_RETRACTED";
pub const AWARD_WINNER_SET: &str = "AWARD_WINNER_SET";
pub const AWARDS_FINALIZED: &str = "AWARDS_FINALIZED";

use crate::core::errors::YearoutError;
use crate::core::models::{
    activity::ActivityResult,
    audit::EventAudit,
    award::{Award, AwardDefinition, AwardVote},
    event::{Attendee, Event, Proposal, ProposalVote},
    expense::Expense,
    lore::LoreEntry,
    ritual::Ritual,
    user::User,
};
use async_trait::async_trait;

/// Persistence for every ledger the service writes to.
///
/// `save_*` upserts by id. List methods return records in insertion order.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_user(&self, user: User) -> Result<(), YearoutError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, YearoutError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, YearoutError>;

    async fn save_ritual(&self, ritual: Ritual) -> Result<(), YearoutError>;
    async fn get_ritual(&self, ritual_id: &str) -> Result<Option<Ritual>, YearoutError>;
    async fn get_ritual_by_slug(&self, slug: &str) -> Result<Option<Ritual>, YearoutError>;
    async fn get_ritual_by_invite_token(&self, token: &str) -> Result<Option<Ritual>, YearoutError>;
    async fn get_user_rituals(&self, user_id: &str) -> Result<Vec<Ritual>, YearoutError>;

    async fn save_award_definition(&self, definition: AwardDefinition) -> Result<(), YearoutError>;
    async fn get_award_definitions(&self, ritual_id: &str) -> Result<Vec<AwardDefinition>, YearoutError>;

    async fn save_event(&self, event: Event) -> Result<(), YearoutError>;
    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, YearoutError>;
    /// Newest year first.
    async fn get_ritual_events(&self, ritual_id: &str) -> Result<Vec<Event>, YearoutError>;
    async fn get_event_by_year(&self, ritual_id: &str, year: i32) -> Result<Option<Event>, YearoutError>;

    async fn save_proposal(&self, proposal: Proposal) -> Result<(), YearoutError>;
    async fn get_proposal(&self, proposal_id: &str) -> Result<Option<Proposal>, YearoutError>;
    async fn delete_proposal(&self, proposal_id: &str) -> Result<(), YearoutError>;
    async fn get_event_proposals(&self, event_id: &str) -> Result<Vec<Proposal>, YearoutError>;
    async fn save_proposal_vote(&self, vote: ProposalVote) -> Result<(), YearoutError>;
    async fn get_proposal_votes(&self, proposal_id: &str) -> Result<Vec<ProposalVote>, YearoutError>;

    async fn save_attendee(&self, attendee: Attendee) -> Result<(), YearoutError>;
    async fn get_attendee(&self, event_id: &str, user_id: &str) -> Result<Option<Attendee>, YearoutError>;
    async fn get_event_attendees(&self, event_id: &str) -> Result<Vec<Attendee>, YearoutError>;

    async fn save_expense(&self, expense: Expense) -> Result<(), YearoutError>;
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, YearoutError>;
    async fn delete_expense(&self, expense_id: &str) -> Result<(), YearoutError>;
    async fn get_event_expenses(&self, event_id: &str) -> Result<Vec<Expense>, YearoutError>;

    async fn save_lore_entry(&self, entry: LoreEntry) -> Result<(), YearoutError>;
    async fn get_lore_entry(&self, entry_id: &str) -> Result<Option<LoreEntry>, YearoutError>;
    async fn get_event_lore_entries(&self, event_id: &str) -> Result<Vec<LoreEntry>, YearoutError>;

    async fn save_activity_result(&self, result: ActivityResult) -> Result<(), YearoutError>;
    async fn get_event_activity_results(&self, event_id: &str) -> Result<Vec<ActivityResult>, YearoutError>;

    async fn save_award_vote(&self, vote: AwardVote) -> Result<(), YearoutError>;
    async fn get_award_vote(&self, vote_id: &str) -> Result<Option<AwardVote>, YearoutError>;
    async fn delete_award_vote(&self, vote_id: &str) -> Result<(), YearoutError>;
    async fn get_event_award_votes(&self, event_id: &str) -> Result<Vec<AwardVote>, YearoutError>;

    /// Replaces any existing award for the same event and definition.
    async fn upsert_award(&self, award: Award) -> Result<Award, YearoutError>;
    async fn get_event_awards(&self, event_id: &str) -> Result<Vec<Award>, YearoutError>;

    async fn save_event_audit(&self, audit: EventAudit) -> Result<(), YearoutError>;
    async fn get_event_audits(&self, event_id: &str) -> Result<Vec<EventAudit>, YearoutError>;
}

pub mod in_memory;

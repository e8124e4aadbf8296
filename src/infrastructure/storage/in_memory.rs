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
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

fn upsert_by<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    rituals: Arc<RwLock<HashMap<String, Ritual>>>,
    award_definitions: Arc<RwLock<Vec<AwardDefinition>>>,
    events: Arc<RwLock<HashMap<String, Event>>>,
    proposals: Arc<RwLock<Vec<Proposal>>>,
    proposal_votes: Arc<RwLock<Vec<ProposalVote>>>,
    attendees: Arc<RwLock<Vec<Attendee>>>,
    expenses: Arc<RwLock<Vec<Expense>>>,
    lore_entries: Arc<RwLock<Vec<LoreEntry>>>,
    activity_results: Arc<RwLock<Vec<ActivityResult>>>,
    award_votes: Arc<RwLock<Vec<AwardVote>>>,
    awards: Arc<RwLock<Vec<Award>>>,
    event_audits: Arc<RwLock<Vec<EventAudit>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_user(&self, user: User) -> Result<(), YearoutError> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, YearoutError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, YearoutError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn save_ritual(&self, ritual: Ritual) -> Result<(), YearoutError> {
        let mut rituals = self.rituals.write().await;
        if rituals.values().any(|r| r.slug == ritual.slug && r.id != ritual.id) {
            return Err(YearoutError::StorageError(format!("Slug {} already taken", ritual.slug)));
        }
        rituals.insert(ritual.id.clone(), ritual);
        Ok(())
    }

    async fn get_ritual(&self, ritual_id: &str) -> Result<Option<Ritual>, YearoutError> {
        let rituals = self.rituals.read().await;
        Ok(rituals.get(ritual_id).cloned())
    }

    async fn get_ritual_by_slug(&self, slug: &str) -> Result<Option<Ritual>, YearoutError> {
        let rituals = self.rituals.read().await;
        Ok(rituals.values().find(|r| r.slug == slug).cloned())
    }

    async fn get_ritual_by_invite_token(&self, token: &str) -> Result<Option<Ritual>, YearoutError> {
        let rituals = self.rituals.read().await;
        Ok(rituals.values().find(|r| r.invite_token == token).cloned())
    }

    async fn get_user_rituals(&self, user_id: &str) -> Result<Vec<Ritual>, YearoutError> {
        let rituals = self.rituals.read().await;
        let mut joined: Vec<Ritual> = rituals
            .values()
            .filter(|r| r.members.iter().any(|m| m.user_id == user_id))
            .cloned()
            .collect();
        joined.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(joined)
    }

    async fn save_award_definition(&self, definition: AwardDefinition) -> Result<(), YearoutError> {
        let mut definitions = self.award_definitions.write().await;
        let id = definition.id.clone();
        upsert_by(&mut definitions, definition, |d| d.id == id);
        Ok(())
    }

    async fn get_award_definitions(&self, ritual_id: &str) -> Result<Vec<AwardDefinition>, YearoutError> {
        let definitions = self.award_definitions.read().await;
        Ok(definitions.iter().filter(|d| d.ritual_id == ritual_id).cloned().collect())
    }

    async fn save_event(&self, event: Event) -> Result<(), YearoutError> {
        let mut events = self.events.write().await;
        events.insert(event.id.clone(), event);
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, YearoutError> {
        let events = self.events.read().await;
        Ok(events.get(event_id).cloned())
    }

    async fn get_ritual_events(&self, ritual_id: &str) -> Result<Vec<Event>, YearoutError> {
        let events = self.events.read().await;
        let mut found: Vec<Event> = events.values().filter(|e| e.ritual_id == ritual_id).cloned().collect();
        found.sort_by(|a, b| b.year.cmp(&a.year).then(a.created_at.cmp(&b.created_at)));
        Ok(found)
    }

    async fn get_event_by_year(&self, ritual_id: &str, year: i32) -> Result<Option<Event>, YearoutError> {
        let events = self.events.read().await;
        Ok(events
            .values()
            .filter(|e| e.ritual_id == ritual_id && e.year == year)
            .min_by_key(|e| e.created_at)
            .cloned())
    }

    async fn save_proposal(&self, proposal: Proposal) -> Result<(), YearoutError> {
        let mut proposals = self.proposals.write().await;
        let id = proposal.id.clone();
        upsert_by(&mut proposals, proposal, |p| p.id == id);
        Ok(())
    }

    async fn get_proposal(&self, proposal_id: &str) -> Result<Option<Proposal>, YearoutError> {
        let proposals = self.proposals.read().await;
        Ok(proposals.iter().find(|p| p.id == proposal_id).cloned())
    }

    async fn delete_proposal(&self, proposal_id: &str) -> Result<(), YearoutError> {
        let mut proposals = self.proposals.write().await;
        proposals.retain(|p| p.id != proposal_id);
        let mut votes = self.proposal_votes.write().await;
        votes.retain(|v| v.proposal_id != proposal_id);
        Ok(())
    }

    async fn get_event_proposals(&self, event_id: &str) -> Result<Vec<Proposal>, YearoutError> {
        let proposals = self.proposals.read().await;
        Ok(proposals.iter().filter(|p| p.event_id == event_id).cloned().collect())
    }

    async fn save_proposal_vote(&self, vote: ProposalVote) -> Result<(), YearoutError> {
        let mut votes = self.proposal_votes.write().await;
        let id = vote.id.clone();
        upsert_by(&mut votes, vote, |v| v.id == id);
        Ok(())
    }

    async fn get_proposal_votes(&self, proposal_id: &str) -> Result<Vec<ProposalVote>, YearoutError> {
        let votes = self.proposal_votes.read().await;
        Ok(votes.iter().filter(|v| v.proposal_id == proposal_id).cloned().collect())
    }

    async fn save_attendee(&self, attendee: Attendee) -> Result<(), YearoutError> {
        let mut attendees = self.attendees.write().await;
        let (event_id, user_id) = (attendee.event_id.clone(), attendee.user_id.clone());
        upsert_by(&mut attendees, attendee, |a| a.event_id == event_id && a.user_id == user_id);
        Ok(())
    }

    async fn get_attendee(&self, event_id: &str, user_id: &str) -> Result<Option<Attendee>, YearoutError> {
        let attendees = self.attendees.read().await;
        Ok(attendees
            .iter()
            .find(|a| a.event_id == event_id && a.user_id == user_id)
            .cloned())
    }

    async fn get_event_attendees(&self, event_id: &str) -> Result<Vec<Attendee>, YearoutError> {
        let attendees = self.attendees.read().await;
        Ok(attendees.iter().filter(|a| a.event_id == event_id).cloned().collect())
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), YearoutError> {
        let mut expenses = self.expenses.write().await;
        let id = expense.id.clone();
        upsert_by(&mut expenses, expense, |e| e.id == id);
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, YearoutError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().find(|e| e.id == expense_id).cloned())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<(), YearoutError> {
        let mut expenses = self.expenses.write().await;
        expenses.retain(|e| e.id != expense_id);
        Ok(())
    }

    async fn get_event_expenses(&self, event_id: &str) -> Result<Vec<Expense>, YearoutError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().filter(|e| e.event_id == event_id).cloned().collect())
    }

    async fn save_lore_entry(&self, entry: LoreEntry) -> Result<(), YearoutError> {
        let mut entries = self.lore_entries.write().await;
        let id = entry.id.clone();
        upsert_by(&mut entries, entry, |e| e.id == id);
        Ok(())
    }

    async fn get_lore_entry(&self, entry_id: &str) -> Result<Option<LoreEntry>, YearoutError> {
        let entries = self.lore_entries.read().await;
        Ok(entries.iter().find(|e| e.id == entry_id).cloned())
    }

    async fn get_event_lore_entries(&self, event_id: &str) -> Result<Vec<LoreEntry>, YearoutError> {
        let entries = self.lore_entries.read().await;
        Ok(entries.iter().filter(|e| e.event_id == event_id).cloned().collect())
    }

    async fn save_activity_result(&self, result: ActivityResult) -> Result<(), YearoutError> {
        let mut results = self.activity_results.write().await;
        let id = result.id.clone();
        upsert_by(&mut results, result, |r| r.id == id);
        Ok(())
    }

    async fn get_event_activity_results(&self, event_id: &str) -> Result<Vec<ActivityResult>, YearoutError> {
        let results = self.activity_results.read().await;
        Ok(results.iter().filter(|r| r.event_id == event_id).cloned().collect())
    }

    async fn save_award_vote(&self, vote: AwardVote) -> Result<(), YearoutError> {
        let mut votes = self.award_votes.write().await;
        let id = vote.id.clone();
        upsert_by(&mut votes, vote, |v| v.id == id);
        Ok(())
    }

    async fn get_award_vote(&self, vote_id: &str) -> Result<Option<AwardVote>, YearoutError> {
        let votes = self.award_votes.read().await;
        Ok(votes.iter().find(|v| v.id == vote_id).cloned())
    }

    async fn delete_award_vote(&self, vote_id: &str) -> Result<(), YearoutError> {
        let mut votes = self.award_votes.write().await;
        votes.retain(|v| v.id != vote_id);
        Ok(())
    }

    async fn get_event_award_votes(&self, event_id: &str) -> Result<Vec<AwardVote>, YearoutError> {
        let votes = self.award_votes.read().await;
        Ok(votes.iter().filter(|v| v.event_id == event_id).cloned().collect())
    }

    async fn upsert_award(&self, award: Award) -> Result<Award, YearoutError> {
        let mut awards = self.awards.write().await;
        match awards
            .iter_mut()
            .find(|a| a.event_id == award.event_id && a.award_definition_id == award.award_definition_id)
        {
            Some(existing) => {
                existing.winner_id = award.winner_id;
                Ok(existing.clone())
            }
            None => {
                awards.push(award.clone());
                Ok(award)
            }
        }
    }

    async fn get_event_awards(&self, event_id: &str) -> Result<Vec<Award>, YearoutError> {
        let awards = self.awards.read().await;
        Ok(awards.iter().filter(|a| a.event_id == event_id).cloned().collect())
    }

    async fn save_event_audit(&self, audit: EventAudit) -> Result<(), YearoutError> {
        let mut audits = self.event_audits.write().await;
        audits.push(audit);
        Ok(())
    }

    async fn get_event_audits(&self, event_id: &str) -> Result<Vec<EventAudit>, YearoutError> {
        let audits = self.event_audits.read().await;
        Ok(audits.iter().filter(|a| a.event_id == event_id).cloned().collect())
    }
}

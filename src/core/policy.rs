//! Who may change what. Every check works on already-loaded records so it can be
//! exercised without storage.

use crate::core::models::{event::Event, expense::Expense, lore::LoreEntry, ritual::Ritual};

pub fn is_member(user_id: &str, ritual: &Ritual) -> bool {
    ritual.member(user_id).is_some()
}

/// Sponsors run the ritual: events, award definitions, award results.
pub fn can_manage_ritual(user_id: &str, ritual: &Ritual) -> bool {
    ritual.member(user_id).is_some_and(|m| m.is_sponsor())
}

/// Sponsors and the event's own organizer may edit an event.
pub fn can_edit_event(user_id: &str, ritual: &Ritual, event: &Event) -> bool {
    if event.ritual_id != ritual.id || !is_member(user_id, ritual) {
        return false;
    }
    can_manage_ritual(user_id, ritual) || event.organizer_id.as_deref() == Some(user_id)
}

pub fn can_delete_expense(user_id: &str, ritual: &Ritual, event: &Event, expense: &Expense) -> bool {
    expense.event_id == event.id && (expense.paid_by == user_id || can_edit_event(user_id, ritual, event))
}

pub fn can_curate_lore(user_id: &str, ritual: &Ritual, event: &Event, entry: &LoreEntry) -> bool {
    entry.event_id == event.id && (entry.author_id == user_id || can_edit_event(user_id, ritual, event))
}

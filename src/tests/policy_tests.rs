use crate::core::models::{
    event::{Event, EventStatus},
    expense::Expense,
    lore::{LoreEntry, LoreKind},
    ritual::{CrewRole, Ritual, RitualMember},
};
use crate::core::policy::{can_curate_lore, can_delete_expense, can_edit_event, can_manage_ritual, is_member};
use crate::tests::at;

fn member(user_id: &str, role: CrewRole) -> RitualMember {
    RitualMember {
        user_id: user_id.to_string(),
        role,
        is_core_crew: role == CrewRole::Sponsor,
        joined_at: at(0),
    }
}

fn ritual() -> Ritual {
    Ritual {
        id: "ritual".to_string(),
        name: "Boys Trip".to_string(),
        slug: "boys-trip".to_string(),
        sponsor_id: "sam".to_string(),
        invite_token: "token".to_string(),
        tagline: None,
        members: vec![
            member("sam", CrewRole::Sponsor),
            member("olga", CrewRole::Organizer),
            member("carl", CrewRole::CrewMember),
            member("cleo", CrewRole::CrewMember),
        ],
        created_at: at(0),
    }
}

fn event(organizer_id: Option<&str>) -> Event {
    Event {
        id: "event".to_string(),
        ritual_id: "ritual".to_string(),
        organizer_id: organizer_id.map(String::from),
        name: "Yearout".to_string(),
        year: 2025,
        location: None,
        status: EventStatus::Planning,
        sealed_at: None,
        created_at: at(0),
    }
}

#[test]
fn test_only_sponsors_manage_the_ritual() {
    let ritual = ritual();
    assert!(can_manage_ritual("sam", &ritual));
    assert!(!can_manage_ritual("olga", &ritual));
    assert!(!can_manage_ritual("carl", &ritual));
    assert!(!can_manage_ritual("stranger", &ritual));
    assert!(is_member("carl", &ritual));
    assert!(!is_member("stranger", &ritual));
}

#[test]
fn test_sponsor_and_event_organizer_edit_event() {
    let ritual = ritual();
    let event = event(Some("olga"));
    assert!(can_edit_event("sam", &ritual, &event));
    assert!(can_edit_event("olga", &ritual, &event));
    assert!(!can_edit_event("carl", &ritual, &event));

    // the organizer role alone does not grant edit rights on someone else's event
    let other = Event {
        organizer_id: Some("carl".to_string()),
        ..event.clone()
    };
    assert!(!can_edit_event("olga", &ritual, &other));
    assert!(can_edit_event("carl", &ritual, &other));

    let foreign = Event {
        ritual_id: "elsewhere".to_string(),
        ..event
    };
    assert!(!can_edit_event("sam", &ritual, &foreign));
}

#[test]
fn test_organizer_who_left_loses_edit_rights() {
    let mut ritual = ritual();
    let event = event(Some("olga"));
    ritual.members.retain(|m| m.user_id != "olga");
    assert!(!can_edit_event("olga", &ritual, &event));
}

#[test]
fn test_expense_deletion_rights() {
    let ritual = ritual();
    let event = event(Some("olga"));
    let expense = Expense {
        id: "expense".to_string(),
        event_id: "event".to_string(),
        paid_by: "carl".to_string(),
        description: "Fuel".to_string(),
        amount_cents: 4200,
        created_at: at(1),
    };
    assert!(can_delete_expense("carl", &ritual, &event, &expense));
    assert!(can_delete_expense("olga", &ritual, &event, &expense));
    assert!(can_delete_expense("sam", &ritual, &event, &expense));
    assert!(!can_delete_expense("cleo", &ritual, &event, &expense));
}

#[test]
fn test_lore_curation_rights() {
    let ritual = ritual();
    let event = event(None);
    let entry = LoreEntry {
        id: "lore".to_string(),
        event_id: "event".to_string(),
        author_id: "cleo".to_string(),
        kind: LoreKind::Memory,
        content: "Sunrise swim".to_string(),
        location: None,
        is_hall_of_fame: false,
        created_at: at(2),
    };
    assert!(can_curate_lore("cleo", &ritual, &event, &entry));
    assert!(can_curate_lore("sam", &ritual, &event, &entry));
    assert!(!can_curate_lore("olga", &ritual, &event, &entry));
    assert!(!can_curate_lore("carl", &ritual, &event, &entry));
}

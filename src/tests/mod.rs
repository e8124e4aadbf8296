mod activity_tests;
mod award_tests;
mod policy_tests;
mod settlement_tests;

use crate::api::handlers::AppService;
use crate::auth::jwt::Claims;
use crate::core::models::{award::AwardVote, event::Event, expense::Expense, ritual::Ritual, user::User};
use crate::core::services::YearoutService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

pub fn create_test_service() -> AppService {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    YearoutService::new(storage, logging, TEST_SECRET.to_string())
}

pub async fn add_test_user(service: &AppService, name: &str) -> User {
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name),
    };
    service.add_user(user).await.unwrap()
}

/// Claims as the auth middleware would hand them to a handler.
pub fn claims_for(user_id: &str, role: &str) -> Claims {
    Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
    }
}

/// A ritual run by `sponsor` with everyone in `members` joined through the invite.
pub struct Crew {
    pub ritual: Ritual,
    pub sponsor: User,
    pub members: Vec<User>,
}

pub async fn create_crew(service: &AppService, member_names: &[&str]) -> Crew {
    let sponsor = add_test_user(service, "sponsor").await;
    let ritual = service
        .create_ritual("Boys Trip".to_string(), "boys-trip".to_string(), None, vec![], &sponsor)
        .await
        .unwrap();

    let mut members = Vec::new();
    for name in member_names {
        let user = add_test_user(service, name).await;
        service.join_ritual(&ritual.invite_token, &user).await.unwrap();
        members.push(user);
    }

    let ritual = service.get_ritual_by_slug(&ritual.slug, &sponsor).await.unwrap();
    Crew { ritual, sponsor, members }
}

/// Creates an event with one proposal and locks it, so every member is an attendee.
pub async fn scheduled_event(service: &AppService, crew: &Crew) -> Event {
    let event = service
        .create_event(
            &crew.ritual.id,
            "Yearout 2025".to_string(),
            2025,
            Some("Lisbon".to_string()),
            Some("May 1-4".to_string()),
            &crew.sponsor,
        )
        .await
        .unwrap();
    let proposals = service.list_proposals(&event.id, &crew.sponsor).await.unwrap();
    service
        .lock_proposal(&proposals[0].proposal.id, &crew.sponsor)
        .await
        .unwrap()
}

pub fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
}

pub fn expense(paid_by: &str, amount_cents: i64) -> Expense {
    Expense {
        id: Uuid::new_v4().to_string(),
        event_id: "event".to_string(),
        paid_by: paid_by.to_string(),
        description: "Dinner".to_string(),
        amount_cents,
        created_at: at(0),
    }
}

pub fn vote(voter: &str, nominee: &str, cast_at: DateTime<Utc>) -> AwardVote {
    AwardVote {
        id: Uuid::new_v4().to_string(),
        event_id: "event".to_string(),
        award_definition_id: "mvp".to_string(),
        voter_id: voter.to_string(),
        nominee_id: nominee.to_string(),
        created_at: cast_at,
    }
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

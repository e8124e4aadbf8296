use crate::core::awards::{finalize_award, tally_votes};
use crate::core::errors::YearoutError;
use crate::core::models::award::AwardKind;
use crate::tests::{add_test_user, at, create_crew, create_test_service, scheduled_event, vote};

#[test]
fn test_no_votes_no_winner() {
    assert_eq!(finalize_award(&[]), None);
}

#[test]
fn test_most_votes_wins() {
    let votes = vec![
        vote("bob", "alice", at(1)),
        vote("carol", "alice", at(2)),
        vote("dave", "bob", at(0)),
    ];
    assert_eq!(finalize_award(&votes).as_deref(), Some("alice"));

    let votes = vec![
        vote("bob", "alice", at(1)),
        vote("carol", "alice", at(2)),
        vote("dave", "alice", at(3)),
        vote("erin", "bob", at(0)),
    ];
    assert_eq!(finalize_award(&votes).as_deref(), Some("alice"));
}

#[test]
fn test_tie_goes_to_earliest_first_vote() {
    let votes = vec![
        vote("carol", "alice", at(1)),
        vote("dave", "alice", at(3)),
        vote("erin", "bob", at(4)),
        vote("frank", "bob", at(0)),
    ];
    assert_eq!(finalize_award(&votes).as_deref(), Some("bob"));
}

#[test]
fn test_exact_tie_goes_to_first_encountered() {
    let votes = vec![vote("carol", "alice", at(0)), vote("dave", "bob", at(0))];
    assert_eq!(finalize_award(&votes).as_deref(), Some("alice"));

    let reversed = vec![vote("dave", "bob", at(0)), vote("carol", "alice", at(0))];
    assert_eq!(finalize_award(&reversed).as_deref(), Some("bob"));
}

#[test]
fn test_finalize_is_idempotent() {
    let votes = vec![
        vote("bob", "alice", at(2)),
        vote("alice", "bob", at(2)),
        vote("carol", "dave", at(5)),
    ];
    assert_eq!(finalize_award(&votes), finalize_award(&votes));
}

#[test]
fn test_self_votes_are_not_counted() {
    let votes = vec![
        vote("alice", "alice", at(0)),
        vote("alice", "alice", at(1)),
        vote("bob", "carol", at(2)),
    ];
    assert_eq!(finalize_award(&votes).as_deref(), Some("carol"));

    let tallies = tally_votes(&votes);
    assert_eq!(tallies.len(), 1);
    assert_eq!(tallies[0].votes, 1);
}

#[test]
fn test_tally_tracks_earliest_vote_regardless_of_order() {
    let votes = vec![
        vote("bob", "alice", at(9)),
        vote("carol", "dave", at(4)),
        vote("dave", "alice", at(2)),
    ];
    let tallies = tally_votes(&votes);
    assert_eq!(tallies[0].nominee_id, "alice");
    assert_eq!(tallies[0].votes, 2);
    assert_eq!(tallies[0].first_vote_at, at(2));
    assert_eq!(tallies[1].nominee_id, "dave");
}

#[tokio::test]
async fn test_cast_award_vote_rejections() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick", "omar"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick, omar) = (&crew.members[0], &crew.members[1], &crew.members[2]);
    let mvp = service.get_award_definitions(&crew.ritual.id, mike).await.unwrap()[0].clone();

    let result = service.cast_award_vote(&event.id, "missing", &mike.id, mike).await;
    assert!(matches!(result, Err(YearoutError::AwardDefinitionNotFound(_))));

    let result = service.cast_award_vote(&event.id, &mvp.id, &mike.id, mike).await;
    assert!(matches!(result, Err(YearoutError::SelfVote)));

    service.cast_award_vote(&event.id, &mvp.id, &nick.id, mike).await.unwrap();
    let result = service.cast_award_vote(&event.id, &mvp.id, &nick.id, mike).await;
    assert!(matches!(result, Err(YearoutError::DuplicateVote(_))));

    service.cast_award_vote(&event.id, &mvp.id, &omar.id, mike).await.unwrap();
    let result = service
        .cast_award_vote(&event.id, &mvp.id, &crew.sponsor.id, mike)
        .await;
    assert!(matches!(result, Err(YearoutError::VoteCapExceeded(2))));

    let outsider = add_test_user(&service, "outsider").await;
    let result = service.cast_award_vote(&event.id, &mvp.id, &outsider.id, nick).await;
    assert!(matches!(result, Err(YearoutError::NomineeNotAttendee(_))));
}

#[tokio::test]
async fn test_vote_cap_is_per_award() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick", "omar"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick, omar) = (&crew.members[0], &crew.members[1], &crew.members[2]);
    let definitions = service.get_award_definitions(&crew.ritual.id, mike).await.unwrap();
    let (mvp, lup) = (&definitions[0], &definitions[1]);

    service.cast_award_vote(&event.id, &mvp.id, &nick.id, mike).await.unwrap();
    service.cast_award_vote(&event.id, &mvp.id, &omar.id, mike).await.unwrap();
    service.cast_award_vote(&event.id, &lup.id, &nick.id, mike).await.unwrap();
}

#[tokio::test]
async fn test_retract_award_vote() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick", "omar"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick, omar) = (&crew.members[0], &crew.members[1], &crew.members[2]);
    let mvp = service.get_award_definitions(&crew.ritual.id, mike).await.unwrap()[0].clone();

    let first = service.cast_award_vote(&event.id, &mvp.id, &nick.id, mike).await.unwrap();
    service.cast_award_vote(&event.id, &mvp.id, &omar.id, mike).await.unwrap();

    let result = service.retract_award_vote(&first.id, nick).await;
    assert!(matches!(result, Err(YearoutError::NotAuthorized(..))));

    service.retract_award_vote(&first.id, mike).await.unwrap();
    service
        .cast_award_vote(&event.id, &mvp.id, &crew.sponsor.id, mike)
        .await
        .unwrap();

    let result = service.retract_award_vote(&first.id, mike).await;
    assert!(matches!(result, Err(YearoutError::AwardVoteNotFound(_))));
}

#[tokio::test]
async fn test_finalize_award_votes_upserts_results() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick", "omar"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick, omar) = (&crew.members[0], &crew.members[1], &crew.members[2]);
    let mvp = service.get_award_definitions(&crew.ritual.id, mike).await.unwrap()[0].clone();

    service.cast_award_vote(&event.id, &mvp.id, &nick.id, mike).await.unwrap();
    service.cast_award_vote(&event.id, &mvp.id, &nick.id, omar).await.unwrap();
    service.cast_award_vote(&event.id, &mvp.id, &omar.id, nick).await.unwrap();

    let result = service.finalize_award_votes(&event.id, mike).await;
    assert!(matches!(result, Err(YearoutError::NotAuthorized(..))));

    // the LUP award has no votes and is skipped
    let decided = service.finalize_award_votes(&event.id, &crew.sponsor).await.unwrap();
    assert_eq!(decided.len(), 1);
    assert_eq!(decided[0].award_definition_id, mvp.id);
    assert_eq!(decided[0].winner_id, nick.id);

    let manual = service
        .set_award_winner(&event.id, &mvp.id, &crew.sponsor.id, &crew.sponsor)
        .await
        .unwrap();
    assert_eq!(manual.id, decided[0].id);
    let awards = service.get_event_awards(&event.id, mike).await.unwrap();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].winner_id, crew.sponsor.id);

    let again = service.finalize_award_votes(&event.id, &crew.sponsor).await.unwrap();
    assert_eq!(again[0].id, decided[0].id);
    assert_eq!(again[0].winner_id, nick.id);
    assert_eq!(service.get_event_awards(&event.id, mike).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_finalize_leaves_manual_result_without_votes() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike"]).await;
    let event = scheduled_event(&service, &crew).await;
    let lup = service.get_award_definitions(&crew.ritual.id, &crew.sponsor).await.unwrap()[1].clone();

    service
        .set_award_winner(&event.id, &lup.id, &crew.members[0].id, &crew.sponsor)
        .await
        .unwrap();
    let decided = service.finalize_award_votes(&event.id, &crew.sponsor).await.unwrap();
    assert!(decided.is_empty());

    let awards = service.get_event_awards(&event.id, &crew.sponsor).await.unwrap();
    assert_eq!(awards[0].winner_id, crew.members[0].id);
}

#[tokio::test]
async fn test_set_award_winner_requires_sponsor_and_known_user() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike"]).await;
    let event = scheduled_event(&service, &crew).await;
    let mike = &crew.members[0];
    let mvp = service.get_award_definitions(&crew.ritual.id, mike).await.unwrap()[0].clone();

    let result = service.set_award_winner(&event.id, &mvp.id, &mike.id, mike).await;
    assert!(matches!(result, Err(YearoutError::NotAuthorized(..))));

    let result = service
        .set_award_winner(&event.id, &mvp.id, "ghost", &crew.sponsor)
        .await;
    assert!(matches!(result, Err(YearoutError::UserNotFound(_))));
}

#[tokio::test]
async fn test_custom_award_definition() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike"]).await;

    let result = service
        .add_award_definition(
            &crew.ritual.id,
            "Iron Liver".to_string(),
            "Last one standing".to_string(),
            AwardKind::Custom,
            &crew.members[0],
        )
        .await;
    assert!(matches!(result, Err(YearoutError::NotAuthorized(..))));

    let definition = service
        .add_award_definition(
            &crew.ritual.id,
            "Iron Liver".to_string(),
            "Last one standing".to_string(),
            AwardKind::Custom,
            &crew.sponsor,
        )
        .await
        .unwrap();
    let definitions = service
        .get_award_definitions(&crew.ritual.id, &crew.members[0])
        .await
        .unwrap();
    assert_eq!(definitions.len(), 3);
    assert_eq!(definitions[2].id, definition.id);
}

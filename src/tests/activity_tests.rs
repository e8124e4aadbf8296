use crate::constants::ACTIVITY_RESULT_ADDED;
use crate::core::errors::YearoutError;
use crate::tests::{add_test_user, create_crew, create_test_service, scheduled_event};
use chrono::NaiveDate;

#[tokio::test]
async fn test_members_record_their_own_results() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick"]).await;
    let event = scheduled_event(&service, &crew).await;
    let mike = &crew.members[0];
    let day = NaiveDate::from_ymd_opt(2025, 5, 2);

    let result = service
        .add_activity_result(
            &event.id,
            &mike.id,
            " fastest_speed ".to_string(),
            "61.4".to_string(),
            Some("mph".to_string()),
            day,
            mike,
        )
        .await
        .unwrap();
    assert_eq!(result.user_id, mike.id);
    assert_eq!(result.metric, "fastest_speed");
    assert_eq!(result.unit.as_deref(), Some("mph"));
    assert_eq!(result.day, day);

    let results = service.list_activity_results(&event.id, &crew.members[1]).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, result.id);

    let audits = service.get_event_audits(&event.id, &crew.sponsor).await.unwrap();
    assert_eq!(audits.last().map(|a| a.action.as_str()), Some(ACTIVITY_RESULT_ADDED));
}

#[tokio::test]
async fn test_only_sponsors_record_results_for_others() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick) = (&crew.members[0], &crew.members[1]);

    let result = service
        .add_activity_result(&event.id, &nick.id, "skier_cross_wins".to_string(), "3".to_string(), None, None, mike)
        .await;
    assert!(matches!(result, Err(YearoutError::NotAuthorized(..))));

    let recorded = service
        .add_activity_result(
            &event.id,
            &nick.id,
            "skier_cross_wins".to_string(),
            "3".to_string(),
            Some(" ".to_string()),
            None,
            &crew.sponsor,
        )
        .await
        .unwrap();
    assert_eq!(recorded.user_id, nick.id);
    assert_eq!(recorded.unit, None);

    let outsider = add_test_user(&service, "outsider").await;
    let result = service
        .add_activity_result(&event.id, &outsider.id, "laps".to_string(), "9".to_string(), None, None, &crew.sponsor)
        .await;
    assert!(matches!(result, Err(YearoutError::NotRitualMember(_))));

    let result = service
        .add_activity_result(&event.id, &outsider.id, "laps".to_string(), "9".to_string(), None, None, &outsider)
        .await;
    assert!(matches!(result, Err(YearoutError::NotRitualMember(_))));
    let result = service.list_activity_results(&event.id, &outsider).await;
    assert!(matches!(result, Err(YearoutError::NotRitualMember(_))));
}

#[tokio::test]
async fn test_activity_result_needs_metric_and_value() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike"]).await;
    let event = scheduled_event(&service, &crew).await;
    let mike = &crew.members[0];

    let result = service
        .add_activity_result(&event.id, &mike.id, "".to_string(), "1".to_string(), None, None, mike)
        .await;
    assert!(matches!(result, Err(YearoutError::InvalidInput(field, _)) if field == "metric"));

    let result = service
        .add_activity_result(&event.id, &mike.id, "laps".to_string(), "  ".to_string(), None, None, mike)
        .await;
    assert!(matches!(result, Err(YearoutError::InvalidInput(field, _)) if field == "value"));
}

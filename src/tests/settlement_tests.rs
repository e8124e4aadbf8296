use crate::core::errors::YearoutError;
use crate::core::models::event::BookingStatus;
use crate::core::models::settlement::{NetBalance, SettlementTransfer};
use crate::core::settlement::{compute_settlement, net_balances, per_person_share, settle_balances, summarize};
use crate::tests::{create_crew, create_test_service, expense, ids, scheduled_event};
use proptest::prelude::*;
use std::collections::HashMap;

fn transfer(from: &str, to: &str, amount_cents: i64) -> SettlementTransfer {
    SettlementTransfer {
        from_user_id: from.to_string(),
        to_user_id: to.to_string(),
        amount_cents,
    }
}

#[test]
fn test_per_person_share_rounds_half_away_from_zero() {
    assert_eq!(per_person_share(9000, 3), Some(3000));
    assert_eq!(per_person_share(100, 3), Some(33));
    assert_eq!(per_person_share(200, 3), Some(67));
    assert_eq!(per_person_share(5, 2), Some(3));
    assert_eq!(per_person_share(0, 4), Some(0));
    assert_eq!(per_person_share(500, 0), None);
}

#[test]
fn test_single_payer_is_paid_back_by_everyone() {
    let expenses = vec![expense("alice", 9000)];
    let transfers = compute_settlement(&expenses, &ids(&["alice", "bob", "carol"]));
    assert_eq!(
        transfers,
        vec![transfer("bob", "alice", 3000), transfer("carol", "alice", 3000)]
    );
}

#[test]
fn test_no_expenses_means_no_transfers() {
    assert!(compute_settlement(&[], &ids(&["alice", "bob"])).is_empty());
}

#[test]
fn test_empty_roster_means_no_transfers() {
    let expenses = vec![expense("alice", 9000), expense("bob", 100)];
    assert!(compute_settlement(&expenses, &[]).is_empty());
    assert!(net_balances(&expenses, &[]).is_empty());
}

#[test]
fn test_sole_participant_owes_nobody() {
    let expenses = vec![expense("alice", 500), expense("alice", 1500)];
    assert!(compute_settlement(&expenses, &ids(&["alice"])).is_empty());
}

#[test]
fn test_largest_creditor_is_settled_first() {
    let expenses = vec![expense("alice", 6000), expense("bob", 3000)];
    let transfers = compute_settlement(&expenses, &ids(&["alice", "bob", "carol", "dave"]));
    assert_eq!(
        transfers,
        vec![
            transfer("carol", "alice", 2250),
            transfer("dave", "alice", 1500),
            transfer("dave", "bob", 750),
        ]
    );
}

#[test]
fn test_payer_outside_roster_is_paid_back_in_full() {
    let expenses = vec![expense("dave", 600)];
    let roster = ids(&["alice", "bob"]);

    let balances = net_balances(&expenses, &roster);
    assert_eq!(
        balances.iter().map(|b| (b.user_id.as_str(), b.net_cents)).collect::<Vec<_>>(),
        vec![("alice", -300), ("bob", -300), ("dave", 600)]
    );
    assert_eq!(
        settle_balances(&balances),
        vec![transfer("alice", "dave", 300), transfer("bob", "dave", 300)]
    );
}

#[test]
fn test_duplicate_roster_entries_count_once() {
    let expenses = vec![expense("alice", 1000)];
    let transfers = compute_settlement(&expenses, &ids(&["alice", "alice", "bob"]));
    assert_eq!(transfers, vec![transfer("bob", "alice", 500)]);
}

#[test]
fn test_rounding_residual_stays_with_creditor() {
    let expenses = vec![expense("a", 100)];
    let summary = summarize(&expenses, &ids(&["a", "b", "c"]));
    assert_eq!(summary.total_cents, 100);
    assert_eq!(summary.per_person_cents, 33);
    assert_eq!(
        summary.balances,
        vec![
            NetBalance { user_id: "a".to_string(), net_cents: 67 },
            NetBalance { user_id: "b".to_string(), net_cents: -33 },
            NetBalance { user_id: "c".to_string(), net_cents: -33 },
        ]
    );
    assert_eq!(summary.transfers, vec![transfer("b", "a", 33), transfer("c", "a", 33)]);
}

#[test]
fn test_equal_balances_keep_roster_order() {
    let expenses = vec![expense("alice", 500), expense("bob", 500)];
    let transfers = compute_settlement(&expenses, &ids(&["alice", "bob", "carol", "dave"]));
    assert_eq!(
        transfers,
        vec![transfer("carol", "alice", 250), transfer("dave", "bob", 250)]
    );
}

proptest! {
    #[test]
    fn balances_sum_within_roster_size(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(0i64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=30),
    ) {
        let roster: Vec<String> = (0..member_count).map(|i| format!("m{}", i)).collect();
        let expenses: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(idx, amount)| {
                let payer = payer_indexes.get(idx).copied().unwrap_or(0);
                expense(&format!("m{}", payer), *amount)
            })
            .collect();

        let total: i64 = net_balances(&expenses, &roster).iter().map(|b| b.net_cents).sum();
        prop_assert!(total.abs() <= member_count as i64);
    }
}

proptest! {
    #[test]
    fn transfers_settle_every_balance(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1i64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=30),
    ) {
        let roster: Vec<String> = (0..member_count).map(|i| format!("m{}", i)).collect();
        let expenses: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(idx, amount)| {
                let payer = payer_indexes.get(idx).copied().unwrap_or(0);
                expense(&format!("m{}", payer), *amount)
            })
            .collect();

        let balances = net_balances(&expenses, &roster);
        let transfers = compute_settlement(&expenses, &roster);
        prop_assert_eq!(&transfers, &compute_settlement(&expenses, &roster));

        let mut remaining: HashMap<&str, i64> =
            balances.iter().map(|b| (b.user_id.as_str(), b.net_cents)).collect();
        for t in &transfers {
            prop_assert!(t.amount_cents > 0);
            prop_assert_ne!(&t.from_user_id, &t.to_user_id);
            *remaining.entry(t.from_user_id.as_str()).or_insert(0) += t.amount_cents;
            *remaining.entry(t.to_user_id.as_str()).or_insert(0) -= t.amount_cents;
        }

        let residual: i64 = balances.iter().map(|b| b.net_cents).sum();
        let unsettled: i64 = remaining.values().map(|v| v.abs()).sum();
        prop_assert_eq!(unsettled, residual.abs());

        let creditors = balances.iter().filter(|b| b.net_cents > 0).count();
        let debtors = balances.iter().filter(|b| b.net_cents < 0).count();
        if creditors > 0 && debtors > 0 {
            prop_assert!(transfers.len() < creditors + debtors);
        } else {
            prop_assert!(transfers.is_empty());
        }
    }
}

#[tokio::test]
async fn test_event_settlement_excludes_opted_out_attendees() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick) = (&crew.members[0], &crew.members[1]);

    service
        .update_booking_status(&event.id, BookingStatus::Out, nick)
        .await
        .unwrap();
    service
        .add_expense(&event.id, "  Villa deposit ".to_string(), 9000, &crew.sponsor)
        .await
        .unwrap();

    let summary = service.get_event_settlement(&event.id, mike).await.unwrap();
    assert_eq!(summary.total_cents, 9000);
    assert_eq!(summary.per_person_cents, 4500);
    assert_eq!(
        summary.transfers,
        vec![SettlementTransfer {
            from_user_id: mike.id.clone(),
            to_user_id: crew.sponsor.id.clone(),
            amount_cents: 4500,
        }]
    );
    assert!(summary.balances.iter().all(|b| b.user_id != nick.id));

    let expenses = service.list_expenses(&event.id, mike).await.unwrap();
    assert_eq!(expenses[0].description, "Villa deposit");
}

#[tokio::test]
async fn test_add_expense_rejects_out_of_range_amounts() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike"]).await;
    let event = scheduled_event(&service, &crew).await;

    for amount in [0, -100, 100_000_001] {
        let result = service
            .add_expense(&event.id, "Taxi".to_string(), amount, &crew.members[0])
            .await;
        assert!(matches!(result, Err(YearoutError::InvalidInput(field, _)) if field == "amount_cents"));
    }

    let result = service
        .add_expense(&event.id, "Taxi".to_string(), 100_000_000, &crew.members[0])
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_add_expense_rejects_blank_description() {
    let service = create_test_service();
    let crew = create_crew(&service, &[]).await;
    let event = scheduled_event(&service, &crew).await;

    let result = service
        .add_expense(&event.id, "   ".to_string(), 500, &crew.sponsor)
        .await;
    assert!(matches!(result, Err(YearoutError::InvalidInput(field, _)) if field == "description"));
}

#[tokio::test]
async fn test_non_member_cannot_add_expense() {
    let service = create_test_service();
    let crew = create_crew(&service, &[]).await;
    let event = scheduled_event(&service, &crew).await;
    let outsider = crate::tests::add_test_user(&service, "outsider").await;

    let result = service.add_expense(&event.id, "Beer".to_string(), 500, &outsider).await;
    assert!(matches!(result, Err(YearoutError::NotRitualMember(_))));
}

#[tokio::test]
async fn test_delete_expense_requires_payer_or_organizer() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike", "nick"]).await;
    let event = scheduled_event(&service, &crew).await;
    let (mike, nick) = (&crew.members[0], &crew.members[1]);

    let first = service.add_expense(&event.id, "Boat".to_string(), 1200, mike).await.unwrap();
    let second = service.add_expense(&event.id, "Fuel".to_string(), 800, mike).await.unwrap();

    let result = service.delete_expense(&first.id, nick).await;
    assert!(matches!(result, Err(YearoutError::NotAuthorized(..))));

    service.delete_expense(&first.id, mike).await.unwrap();
    service.delete_expense(&second.id, &crew.sponsor).await.unwrap();
    assert!(service.list_expenses(&event.id, mike).await.unwrap().is_empty());

    let result = service.delete_expense(&first.id, mike).await;
    assert!(matches!(result, Err(YearoutError::ExpenseNotFound(_))));
}

#[tokio::test]
async fn test_expense_description_keeps_brackets() {
    let service = create_test_service();
    let crew = create_crew(&service, &["mike"]).await;
    let event = scheduled_event(&service, &crew).await;

    let expense = service
        .add_expense(&event.id, "Dinner [Mario's] <tip incl.>".to_string(), 8400, &crew.members[0])
        .await
        .unwrap();
    assert_eq!(expense.description, "Dinner [Mario's] <tip incl.>");
}

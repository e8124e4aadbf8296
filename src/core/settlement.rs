//! Expense settlement for a trip.
//!
//! Every participant owes an equal share of the event total. Whoever paid more than
//! their share is a creditor, everyone else a debtor, and a greedy two-pointer pass
//! pairs the largest creditor with the largest debtor until one side runs out.
//! The result is deterministic but not guaranteed to use the fewest transfers.
//!
//! Amounts are cents and are assumed non-negative; the expense ledger rejects
//! anything else before it reaches this module.

use crate::core::models::expense::Expense;
use crate::core::models::settlement::{NetBalance, SettlementSummary, SettlementTransfer};
use std::collections::HashMap;

/// Equal share of `total_cents` across `participants`, rounded half away from zero.
///
/// Returns `None` when there is nobody to share with.
pub fn per_person_share(total_cents: i64, participants: usize) -> Option<i64> {
    if participants == 0 {
        return None;
    }
    let n = participants as i64;
    let quotient = total_cents / n;
    let remainder = total_cents % n;
    if remainder.abs() * 2 >= n {
        Some(quotient + total_cents.signum())
    } else {
        Some(quotient)
    }
}

fn distinct_participants(participant_ids: &[String]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    participant_ids
        .iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn total_of(expenses: &[Expense]) -> i64 {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Net position of every participant and of every payer outside the roster.
///
/// Roster members come first in roster order, then outside payers in the order
/// their first expense appears. Empty when the roster is empty.
///
/// An id listed twice in the roster counts once: the share divides by the number
/// of distinct participants, not by the length of `participant_ids`.
pub fn net_balances(expenses: &[Expense], participant_ids: &[String]) -> Vec<NetBalance> {
    let roster = distinct_participants(participant_ids);
    let Some(share) = per_person_share(total_of(expenses), roster.len()) else {
        return Vec::new();
    };

    let mut balances: Vec<NetBalance> = Vec::with_capacity(roster.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(roster.len());
    for id in roster {
        index.insert(id, balances.len());
        balances.push(NetBalance {
            user_id: id.to_string(),
            net_cents: -share,
        });
    }

    for expense in expenses {
        let slot = match index.get(expense.paid_by.as_str()) {
            Some(&slot) => slot,
            None => {
                index.insert(expense.paid_by.as_str(), balances.len());
                balances.push(NetBalance {
                    user_id: expense.paid_by.clone(),
                    net_cents: 0,
                });
                balances.len() - 1
            }
        };
        balances[slot].net_cents += expense.amount_cents;
    }

    balances
}

/// Pairwise transfers that settle the given net balances.
pub fn settle_balances(balances: &[NetBalance]) -> Vec<SettlementTransfer> {
    // sort_by is stable: equal balances keep their entry order
    let mut creditors: Vec<(&str, i64)> = balances
        .iter()
        .filter(|b| b.net_cents > 0)
        .map(|b| (b.user_id.as_str(), b.net_cents))
        .collect();
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut debtors: Vec<(&str, i64)> = balances
        .iter()
        .filter(|b| b.net_cents < 0)
        .map(|b| (b.user_id.as_str(), -b.net_cents))
        .collect();
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::new();
    let (mut ci, mut di) = (0, 0);
    while ci < creditors.len() && di < debtors.len() {
        let amount = creditors[ci].1.min(debtors[di].1);
        if amount > 0 {
            transfers.push(SettlementTransfer {
                from_user_id: debtors[di].0.to_string(),
                to_user_id: creditors[ci].0.to_string(),
                amount_cents: amount,
            });
        }
        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;
        if creditors[ci].1 == 0 {
            ci += 1;
        }
        if debtors[di].1 == 0 {
            di += 1;
        }
    }

    transfers
}

/// Transfers that settle `expenses` across `participant_ids`.
///
/// An empty roster yields no transfers whatever the expenses are. A payer who is
/// not on the roster still counts toward the total and is paid back in full.
pub fn compute_settlement(expenses: &[Expense], participant_ids: &[String]) -> Vec<SettlementTransfer> {
    settle_balances(&net_balances(expenses, participant_ids))
}

/// Totals, per-person share, net balances and transfers in one pass.
pub fn summarize(expenses: &[Expense], participant_ids: &[String]) -> SettlementSummary {
    let total_cents = total_of(expenses);
    let roster_size = distinct_participants(participant_ids).len();
    let balances = net_balances(expenses, participant_ids);
    let transfers = settle_balances(&balances);
    SettlementSummary {
        total_cents,
        per_person_cents: per_person_share(total_cents, roster_size).unwrap_or(0),
        balances,
        transfers,
    }
}

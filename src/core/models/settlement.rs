use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A payment that moves money from a debtor to a creditor.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SettlementTransfer {
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount_cents: i64,
}

/// Positive means the participant is owed money, negative means they owe.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NetBalance {
    pub user_id: String,
    pub net_cents: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SettlementSummary {
    pub total_cents: i64,
    pub per_person_cents: i64,
    pub balances: Vec<NetBalance>,
    pub transfers: Vec<SettlementTransfer>,
}

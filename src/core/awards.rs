//! Plurality tally for award votes.

use crate::core::models::award::AwardVote;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NomineeTally {
    pub nominee_id: String,
    pub votes: usize,
    pub first_vote_at: DateTime<Utc>,
}

/// Per-nominee vote counts, in the order each nominee first appears.
///
/// Self-votes are rejected when cast; any that slip through are skipped here.
pub fn tally_votes(votes: &[AwardVote]) -> Vec<NomineeTally> {
    let mut tallies: Vec<NomineeTally> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for vote in votes {
        if vote.voter_id == vote.nominee_id {
            warn!("Ignoring self-vote {} by {}", vote.id, vote.voter_id);
            continue;
        }
        match index.get(vote.nominee_id.as_str()) {
            Some(&slot) => {
                let tally = &mut tallies[slot];
                tally.votes += 1;
                if vote.created_at < tally.first_vote_at {
                    tally.first_vote_at = vote.created_at;
                }
            }
            None => {
                index.insert(vote.nominee_id.as_str(), tallies.len());
                tallies.push(NomineeTally {
                    nominee_id: vote.nominee_id.clone(),
                    votes: 1,
                    first_vote_at: vote.created_at,
                });
            }
        }
    }

    tallies
}

/// Winner of a single award's vote set, or `None` when nobody has been voted for.
///
/// Most votes wins; a tie goes to the nominee whose first vote came earliest, and
/// an exact timestamp tie goes to the nominee encountered first in `votes`.
pub fn finalize_award(votes: &[AwardVote]) -> Option<String> {
    let mut winner: Option<NomineeTally> = None;
    for tally in tally_votes(votes) {
        let beats = match &winner {
            None => true,
            Some(best) => {
                tally.votes > best.votes || (tally.votes == best.votes && tally.first_vote_at < best.first_vote_at)
            }
        };
        if beats {
            winner = Some(tally);
        }
    }
    winner.map(|t| t.nominee_id)
}

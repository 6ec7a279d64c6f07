use std::collections::HashMap;

use super::night::plurality;
use crate::models::roster::Roster;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub eliminated: Option<String>,
    pub top_votes: usize,
}

/// Votes needed to eliminate: strictly more than half of the living.
pub fn majority_threshold(alive: usize) -> usize {
    alive / 2 + 1
}

/// Tallies the day's votes. The leader is eliminated only with a strict
/// plurality that is also a majority of living players. Votes are cleared.
pub fn resolve_day(roster: &mut Roster, votes: &mut HashMap<String, String>) -> DayOutcome {
    let alive = roster.alive_count();

    let counted: Vec<&String> = votes
        .iter()
        .filter(|(voter, target)| roster.is_alive(voter) && roster.is_alive(target))
        .map(|(_, target)| target)
        .collect();

    let mut outcome = DayOutcome::default();
    if let Some((leader, count)) = plurality(counted) {
        outcome.top_votes = count;
        if count > alive / 2 {
            outcome.eliminated = Some(leader);
        } else {
            log::debug!(
                "{} votes for {} fall short of {} needed",
                count,
                leader,
                majority_threshold(alive)
            );
        }
    }

    if let Some(eliminated) = &outcome.eliminated {
        if let Some(player) = roster.get_mut(eliminated) {
            player.is_dead = true;
        }
    }

    votes.clear();
    outcome
}

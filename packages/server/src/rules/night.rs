use std::collections::HashMap;

use crate::models::{
    game::{Investigations, NightActions},
    role::Verdict,
    roster::Roster,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightOutcome {
    pub killed: Option<String>,
    /// (checker, target, verdict) recorded this night
    pub checks: Vec<(String, String, Verdict)>,
}

/// Strict plurality over `targets`. A shared top count selects nobody.
pub fn plurality<'a, I>(targets: I) -> Option<(String, usize)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut tally: HashMap<&String, usize> = HashMap::new();
    for target in targets {
        *tally.entry(target).or_default() += 1;
    }

    let top = tally.values().copied().max()?;
    let mut leaders = tally.into_iter().filter(|(_, count)| *count == top);
    let (leader, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some((leader.clone(), top))
}

/// Resolves the kill vote and the checks of one night. Both intent maps are
/// empty afterwards, whatever happened.
pub fn resolve_night(
    roster: &mut Roster,
    actions: &mut NightActions,
    investigations: &mut Investigations,
) -> NightOutcome {
    let mut outcome = NightOutcome::default();

    let kill_targets: Vec<&String> = actions
        .kills
        .iter()
        .filter(|(actor, target)| {
            roster
                .get(actor)
                .is_some_and(|p| p.is_alive() && p.role.can_kill())
                && roster.is_alive(target)
        })
        .map(|(_, target)| target)
        .collect();

    if let Some((victim, votes)) = plurality(kill_targets) {
        log::debug!("night kill on {} with {} votes", victim, votes);
        outcome.killed = Some(victim);
    }

    for (checker_id, target_id) in &actions.checks {
        let Some(checker) = roster.get(checker_id).filter(|p| p.is_alive()) else {
            continue;
        };
        let Some(target) = roster.get(target_id) else {
            continue;
        };
        if let Some(verdict) = Verdict::for_check(checker.role, target.role) {
            investigations
                .entry(checker_id.clone())
                .or_default()
                .insert(target_id.clone(), verdict);
            outcome
                .checks
                .push((checker_id.clone(), target_id.clone(), verdict));
        }
    }

    // checks resolve against the pre-kill state, so a checker who dies tonight still learns
    if let Some(victim) = &outcome.killed {
        if let Some(player) = roster.get_mut(victim) {
            player.is_dead = true;
        }
    }

    actions.clear();
    outcome
}

use rand::{seq::SliceRandom, Rng};

use crate::models::{config::MIN_PLAYERS, role::Role, roster::Roster};

/// Number of plain mafia (the Don not included) for a table of `players`.
pub fn mafia_count(players: usize) -> usize {
    ((players as i64 - 5).div_euclid(2)).max(1) as usize
}

/// Role multiset for a table of `players`, before shuffling.
pub fn role_deck(players: usize) -> Vec<Role> {
    let mafia = mafia_count(players);
    let mut roles = Vec::with_capacity(players);
    roles.push(Role::Don);
    roles.extend(std::iter::repeat(Role::Mafia).take(mafia));
    roles.push(Role::Sheriff);
    roles.extend(std::iter::repeat(Role::Civilian).take(players.saturating_sub(mafia + 2)));
    roles
}

/// Deals one role to every player. Rosters below the minimum, or rosters that
/// were already dealt, are left untouched and `false` is returned.
pub fn assign_roles<R: Rng + ?Sized>(roster: &mut Roster, rng: &mut R) -> bool {
    let players = roster.count();
    if players < MIN_PLAYERS {
        return false;
    }
    if roster.iter().any(|p| p.role.is_assigned()) {
        log::warn!("refusing to deal roles twice");
        return false;
    }

    // one shuffle of the deck against a fixed seat order
    let mut deck = role_deck(players);
    deck.shuffle(rng);

    for (player, role) in roster.iter_mut().zip(deck) {
        player.role = role;
    }
    log::debug!(
        "dealt {} roles ({} mafia besides the don)",
        players,
        mafia_count(players)
    );
    true
}

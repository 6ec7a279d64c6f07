use crate::models::{game::GameResult, roster::Roster};

/// Evaluated after every night and every day.
pub fn check_winner(roster: &Roster) -> GameResult {
    let alive_mafia = roster
        .alive_players()
        .filter(|p| p.role.is_mafia_aligned())
        .count();
    let alive_civilians = roster.alive_count() - alive_mafia;

    if alive_mafia == 0 {
        GameResult::CivilianWin
    } else if alive_mafia >= alive_civilians {
        GameResult::MafiaWin
    } else {
        GameResult::InProgress
    }
}

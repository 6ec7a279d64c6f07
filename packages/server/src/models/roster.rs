use super::player::Player;

/// Session membership in join order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player. Never touches the role; assignment is a separate pass.
    pub fn add(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Removes a player if present. Absent ids are fine.
    pub fn remove(&mut self, player_id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == player_id)?;
        Some(self.players.remove(index))
    }

    pub fn get(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn get_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.get(player_id).is_some()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn count(&self) -> usize {
        self.players.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    pub fn ready_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_ready).count()
    }

    /// `true` only when the id is in the roster and that player is alive.
    pub fn is_alive(&self, player_id: &str) -> bool {
        self.get(player_id).is_some_and(Player::is_alive)
    }
}

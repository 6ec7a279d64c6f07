use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Unassigned,
    Don,      // mafia boss, kills and hunts the sheriff
    Mafia,
    Sheriff,
    Civilian,
}

impl Role {
    pub fn is_assigned(self) -> bool {
        self != Role::Unassigned
    }

    pub fn is_mafia_aligned(self) -> bool {
        matches!(self, Role::Don | Role::Mafia)
    }

    pub fn can_kill(self) -> bool {
        self.is_mafia_aligned()
    }

    pub fn can_check(self) -> bool {
        matches!(self, Role::Don | Role::Sheriff)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Unassigned => write!(f, "unassigned"),
            Role::Don => write!(f, "don"),
            Role::Mafia => write!(f, "mafia"),
            Role::Sheriff => write!(f, "sheriff"),
            Role::Civilian => write!(f, "civilian"),
        }
    }
}

/// Coarse result of a night check. Never carries the checked player's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    MafiaAligned,
    CivilianAligned,
    IsSheriff,
    NotSheriff,
}

impl Verdict {
    /// What `checker` learns about a player holding `target`.
    pub fn for_check(checker: Role, target: Role) -> Option<Verdict> {
        match checker {
            Role::Sheriff if target.is_mafia_aligned() => Some(Verdict::MafiaAligned),
            Role::Sheriff => Some(Verdict::CivilianAligned),
            Role::Don if target == Role::Sheriff => Some(Verdict::IsSheriff),
            Role::Don => Some(Verdict::NotSheriff),
            _ => None,
        }
    }
}

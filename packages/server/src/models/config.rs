use std::env;
use std::time::Duration;

/// Fewest players a game can start with. Configuration may raise it, never lower it.
pub const MIN_PLAYERS: usize = 4;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub night_duration: Duration,
    // must stay longer than the night
    pub day_duration: Duration,
    pub min_players: usize,
    pub max_players: usize,
    // allow POST /phase/next to cut a phase short
    pub manual_advance: bool,
    pub max_chat_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            night_duration: Duration::from_secs(30),
            day_duration: Duration::from_secs(90),
            min_players: MIN_PLAYERS,
            max_players: 12,
            manual_advance: cfg!(debug_assertions) || env::var("DEBUG_MODE").is_ok(),
            max_chat_len: 500,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let night_duration = env::var("NIGHT_DURATION_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.night_duration);
        let day_duration = env::var("DAY_DURATION_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.day_duration);
        let min_players = env::var("MIN_PLAYERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.min_players)
            .max(MIN_PLAYERS);
        let max_players = env::var("MAX_PLAYERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_players)
            .max(min_players);
        let manual_advance = env::var("MANUAL_ADVANCE")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.manual_advance);
        let max_chat_len = env::var("MAX_CHAT_LEN")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_chat_len);

        let config = Self {
            night_duration,
            day_duration: day_duration
                .max(night_duration.saturating_add(Duration::from_secs(1))),
            min_players,
            max_players,
            manual_advance,
            max_chat_len,
        };
        log::debug!("game config: {:?}", config);
        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("Off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_from_env_clamps() {
        // the only test in this crate that touches these variables
        env::set_var("NIGHT_DURATION_SECONDS", u64::MAX.to_string());
        env::set_var("DAY_DURATION_SECONDS", "10");
        env::set_var("MIN_PLAYERS", "2");
        env::set_var("MAX_CHAT_LEN", "80");
        let config = GameConfig::from_env();
        for key in [
            "NIGHT_DURATION_SECONDS",
            "DAY_DURATION_SECONDS",
            "MIN_PLAYERS",
            "MAX_CHAT_LEN",
        ] {
            env::remove_var(key);
        }

        assert_eq!(config.night_duration, Duration::from_secs(u64::MAX));
        assert!(config.day_duration > config.night_duration);
        assert_eq!(config.min_players, MIN_PLAYERS);
        assert_eq!(config.max_chat_len, 80);
    }

    #[test]
    fn test_default_day_outlasts_night() {
        let config = GameConfig::default();
        assert!(config.day_duration > config.night_duration);
        assert_eq!(config.min_players, MIN_PLAYERS);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One side of a game as the chess.com API reports it.
///
/// Untrusted input: every field is defaulted, and fields this tool does
/// not model are kept in `extra` so a load/save round trip does not shed
/// data.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerSide {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single game record from the public API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eco: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub white: PlayerSide,
    #[serde(default)]
    pub black: PlayerSide,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl GameRecord {
    /// Which side the tracked player occupies, if any.
    /// Usernames compare case-insensitively (the API mixes display casing).
    pub fn side_of(&self, username: &str) -> Option<(Color, &PlayerSide)> {
        if self.white.username.eq_ignore_ascii_case(username) {
            Some((Color::White, &self.white))
        } else if self.black.username.eq_ignore_ascii_case(username) {
            Some((Color::Black, &self.black))
        } else {
            None
        }
    }
}

/// On-disk envelope shared by all three pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GamesFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(white: &str, black: &str) -> GameRecord {
        GameRecord {
            white: PlayerSide {
                username: white.to_string(),
                result: "win".to_string(),
                ..PlayerSide::default()
            },
            black: PlayerSide {
                username: black.to_string(),
                result: "resigned".to_string(),
                ..PlayerSide::default()
            },
            ..GameRecord::default()
        }
    }

    #[test]
    fn side_matching_is_case_insensitive() {
        let game = record("TestPlayer", "rival");
        let (color, side) = game.side_of("testplayer").expect("white side should match");
        assert_eq!(color, Color::White);
        assert_eq!(side.result, "win");

        let (color, side) = game.side_of("RIVAL").expect("black side should match");
        assert_eq!(color, Color::Black);
        assert_eq!(side.result, "resigned");
    }

    #[test]
    fn unmatched_usernames_yield_none() {
        let game = record("alice", "bob");
        assert!(game.side_of("carol").is_none());
    }

    #[test]
    fn missing_sides_deserialize_to_empty() {
        let game: GameRecord = serde_json::from_str("{}").expect("empty object should parse");
        assert!(game.white.username.is_empty());
        assert!(game.side_of("anyone").is_none());
    }
}

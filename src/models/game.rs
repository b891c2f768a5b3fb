// models/game.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::player::Role;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Completed,
}

// One round of a room. The Mantri and Chor references are fixed at creation;
// the guess fields are written exactly once, when the round resolves.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Game {
    pub game_id: String,
    pub room_id: String,
    pub mantri_player_id: String,
    pub chor_player_id: String,
    pub guessed_player_id: Option<String>,
    pub guess_correct: Option<bool>,
    pub raja_points: i32,
    pub mantri_points: i32,
    pub chor_points: i32,
    pub sipahi_points: i32,
    pub status: GameStatus,
    pub created_at: String,
}

impl Game {
    pub fn new(room_id: String, mantri_player_id: String, chor_player_id: String) -> Self {
        Game {
            game_id: Uuid::new_v4().to_string(),
            room_id,
            mantri_player_id,
            chor_player_id,
            guessed_player_id: None,
            guess_correct: None,
            raja_points: 0,
            mantri_points: 0,
            chor_points: 0,
            sipahi_points: 0,
            status: GameStatus::InProgress,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn round_points(&self, role: Role) -> i32 {
        match role {
            Role::Raja => self.raja_points,
            Role::Mantri => self.mantri_points,
            Role::Chor => self.chor_points,
            Role::Sipahi => self.sipahi_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_is_in_progress_with_no_guess() {
        let game = Game::new("room".to_string(), "m".to_string(), "c".to_string());
        assert_eq!(game.status, GameStatus::InProgress);
        assert!(game.guessed_player_id.is_none());
        assert!(game.guess_correct.is_none());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&GameStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}

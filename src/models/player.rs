// models/player.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Raja,
    Mantri,
    Chor,
    Sipahi,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Raja, Role::Mantri, Role::Chor, Role::Sipahi];

    pub fn description(&self) -> &'static str {
        match self {
            Role::Raja => {
                "You are the Raja (King). Observe and wait for results. You get 1000 points."
            }
            Role::Mantri => "You are the Mantri (Minister). You must guess who the Chor is!",
            Role::Chor => "You are the Chor (Thief). Try not to get caught!",
            Role::Sipahi => "You are the Sipahi (Soldier). Wait for Mantri to make their guess.",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub room_id: String,
    pub role: Option<Role>, // unset until the room fills up
    pub points: i32,
    pub joined_at: String,
}

// Player info without the hidden role, for pre-reveal listings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicPlayer {
    pub player_id: String,
    pub name: String,
    pub points: i32,
}

impl Player {
    pub fn new(name: String, room_id: String) -> Self {
        Player {
            player_id: Uuid::new_v4().to_string(),
            name,
            room_id,
            role: None,
            points: 0,
            joined_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn to_public(&self) -> PublicPlayer {
        PublicPlayer {
            player_id: self.player_id.clone(),
            name: self.name.clone(),
            points: self.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_no_role_and_zero_points() {
        let player = Player::new("Alice".to_string(), "abcd1234".to_string());
        assert!(player.role.is_none());
        assert_eq!(player.points, 0);
    }

    #[test]
    fn role_serializes_capitalized() {
        let json = serde_json::to_string(&Role::Sipahi).unwrap();
        assert_eq!(json, "\"Sipahi\"");
    }

    #[test]
    fn public_view_hides_role() {
        let mut player = Player::new("Bob".to_string(), "abcd1234".to_string());
        player.role = Some(Role::Chor);
        let json = serde_json::to_value(player.to_public()).unwrap();
        assert!(json.get("role").is_none());
    }
}

// models/room.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,  // room open, fewer than 4 players
    Playing,  // roles assigned, guess pending
    Finished, // guess submitted, scores final
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Room {
    pub room_id: String,    // short join token shared with other players
    pub created_by: String, // player_id of the creator
    pub status: RoomStatus,
    pub player_count: i32,
    pub created_at: String,
}

impl Room {
    pub fn new(created_by: String) -> Self {
        Room {
            room_id: Uuid::new_v4().to_string()[..8].to_string(),
            created_by,
            status: RoomStatus::Waiting,
            player_count: 0,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

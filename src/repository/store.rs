// repository/store.rs

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::game::{Game, GameStatus};
use crate::models::player::Player;
use crate::models::room::Room;

// In-memory entity store for rooms, players and games. Point lookups,
// scans by room and whole-record updates; each call is atomic, so a
// concurrent reader never sees a half-written record.
//
// Players live in a Vec on purpose: scans must return join order, which
// both role assignment and leaderboard tie-breaking depend on.
#[derive(Debug, Default)]
pub struct EntityStore {
    rooms: RwLock<HashMap<String, Room>>,
    players: RwLock<Vec<Player>>,
    games: RwLock<Vec<Game>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_room(&self, room: Room) -> Room {
        self.rooms
            .write()
            .unwrap()
            .insert(room.room_id.clone(), room.clone());
        room
    }

    pub fn get_room(&self, room_id: &str) -> Option<Room> {
        self.rooms.read().unwrap().get(room_id).cloned()
    }

    pub fn update_room(&self, room: Room) {
        self.rooms
            .write()
            .unwrap()
            .insert(room.room_id.clone(), room);
    }

    pub fn add_player(&self, player: Player) -> Player {
        self.players.write().unwrap().push(player.clone());
        player
    }

    pub fn get_player(&self, player_id: &str) -> Option<Player> {
        self.players
            .read()
            .unwrap()
            .iter()
            .find(|p| p.player_id == player_id)
            .cloned()
    }

    pub fn get_players_in_room(&self, room_id: &str) -> Vec<Player> {
        self.players
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.room_id == room_id)
            .cloned()
            .collect()
    }

    pub fn update_players(&self, updated: &[Player]) {
        let mut players = self.players.write().unwrap();
        for record in updated {
            if let Some(slot) = players.iter_mut().find(|p| p.player_id == record.player_id) {
                *slot = record.clone();
            }
        }
    }

    pub fn create_game(&self, game: Game) -> Game {
        self.games.write().unwrap().push(game.clone());
        game
    }

    pub fn get_in_progress_game(&self, room_id: &str) -> Option<Game> {
        self.games
            .read()
            .unwrap()
            .iter()
            .find(|g| g.room_id == room_id && g.status == GameStatus::InProgress)
            .cloned()
    }

    // Latest game for the room regardless of status; result lookups read the
    // round back after it has completed.
    pub fn get_game_by_room(&self, room_id: &str) -> Option<Game> {
        self.games
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|g| g.room_id == room_id)
            .cloned()
    }

    pub fn update_game(&self, game: Game) {
        let mut games = self.games.write().unwrap();
        if let Some(slot) = games.iter_mut().find(|g| g.game_id == game.game_id) {
            *slot = game;
        }
    }
}

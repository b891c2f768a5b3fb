// services/game_service.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::GameError;
use crate::models::game::{Game, GameStatus};
use crate::models::player::{Player, Role};
use crate::models::room::{Room, RoomStatus};
use crate::repository::store::EntityStore;
use crate::services::result_service::{self, GameResult, LeaderboardEntry};
use crate::services::role_service;
use crate::services::score_service;

pub const ROOM_SIZE: usize = 4;

#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub player: Player,
    pub players_joined: i32,
    pub waiting_for: i32,
    pub roles_assigned: bool,
}

// Owns the room lifecycle: waiting -> playing -> finished, never backwards.
// Every mutating transition takes the room's lock for its whole
// read-modify-write, so a room can never be seen with five players or get
// its roles drawn twice.
pub struct GameService {
    store: EntityStore,
    rng: Mutex<StdRng>,
    room_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl GameService {
    pub fn new(store: EntityStore) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    // Seedable entry point so tests can pin the role permutation.
    pub fn with_rng(store: EntityStore, rng: StdRng) -> Self {
        GameService {
            store,
            rng: Mutex::new(rng),
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    fn room_lock(&self, room_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.room_locks.lock().unwrap();
        locks.entry(room_id.to_string()).or_default().clone()
    }

    fn get_room(&self, room_id: &str) -> Result<Room, GameError> {
        self.store
            .get_room(room_id)
            .ok_or_else(|| GameError::NotFound("Room not found".to_string()))
    }

    pub fn create_room(&self, player_name: &str) -> Result<(Room, Player), GameError> {
        if player_name.trim().is_empty() {
            return Err(GameError::InvalidInput(
                "player_name is required".to_string(),
            ));
        }

        let mut room = Room::new(String::new());
        let player = Player::new(player_name.to_string(), room.room_id.clone());
        room.created_by = player.player_id.clone();
        room.player_count = 1;

        let room = self.store.create_room(room);
        let player = self.store.add_player(player);
        Ok((room, player))
    }

    pub fn join_room(&self, room_id: &str, player_name: &str) -> Result<JoinOutcome, GameError> {
        if player_name.trim().is_empty() {
            return Err(GameError::InvalidInput(
                "player_name is required".to_string(),
            ));
        }

        let lock = self.room_lock(room_id);
        let _guard = lock.lock().unwrap();

        let mut room = self.get_room(room_id)?;
        let current = self.store.get_players_in_room(room_id);
        if current.len() >= ROOM_SIZE {
            return Err(GameError::InvalidState("Room is full".to_string()));
        }
        if room.status != RoomStatus::Waiting {
            return Err(GameError::InvalidState("Game already started".to_string()));
        }

        let player = self
            .store
            .add_player(Player::new(player_name.to_string(), room_id.to_string()));
        room.player_count = current.len() as i32 + 1;

        // The 4th join triggers role assignment inside this same critical
        // section; the room record is written once, with the new count and
        // status together.
        let mut roles_assigned = false;
        if room.player_count as usize == ROOM_SIZE {
            self.assign_roles_locked(&mut room)?;
            roles_assigned = true;
        }
        self.store.update_room(room.clone());

        Ok(JoinOutcome {
            player,
            players_joined: room.player_count,
            waiting_for: ROOM_SIZE as i32 - room.player_count,
            roles_assigned,
        })
    }

    // Explicit assignment trigger, kept as a recovery path for a missed
    // auto-trigger. Same guards, same transition; once roles exist it fails
    // instead of re-randomizing.
    pub fn assign_roles(&self, room_id: &str) -> Result<Room, GameError> {
        let lock = self.room_lock(room_id);
        let _guard = lock.lock().unwrap();

        let mut room = self.get_room(room_id)?;
        let players = self.store.get_players_in_room(room_id);
        if players.len() != ROOM_SIZE {
            return Err(GameError::InvalidInput(
                "Need exactly 4 players to start game".to_string(),
            ));
        }
        if room.status != RoomStatus::Waiting {
            return Err(GameError::InvalidState("Roles already assigned".to_string()));
        }

        self.assign_roles_locked(&mut room)?;
        self.store.update_room(room.clone());
        Ok(room)
    }

    // Caller must hold the room lock and have verified the preconditions.
    // Draws the permutation, persists the players, creates the in-progress
    // game and flips the room to playing; the caller persists the room.
    fn assign_roles_locked(&self, room: &mut Room) -> Result<(), GameError> {
        let mut players = self.store.get_players_in_room(&room.room_id);
        {
            let mut rng = self.rng.lock().unwrap();
            role_service::assign_roles(&mut players, &mut *rng)?;
        }

        let mantri = players
            .iter()
            .find(|p| p.role == Some(Role::Mantri))
            .ok_or_else(|| GameError::InvalidState("No Mantri assigned".to_string()))?;
        let chor = players
            .iter()
            .find(|p| p.role == Some(Role::Chor))
            .ok_or_else(|| GameError::InvalidState("No Chor assigned".to_string()))?;

        let game = Game::new(
            room.room_id.clone(),
            mantri.player_id.clone(),
            chor.player_id.clone(),
        );

        self.store.update_players(&players);
        self.store.create_game(game);
        room.status = RoomStatus::Playing;
        Ok(())
    }

    pub fn list_players(&self, room_id: &str) -> Result<(Room, Vec<Player>), GameError> {
        let room = self.get_room(room_id)?;
        let players = self.store.get_players_in_room(room_id);
        Ok((room, players))
    }

    pub fn get_role(&self, room_id: &str, player_id: &str) -> Result<(Player, Role), GameError> {
        self.get_room(room_id)?;
        let player = self
            .store
            .get_player(player_id)
            .ok_or_else(|| GameError::NotFound("Player not found".to_string()))?;
        if player.room_id != room_id {
            return Err(GameError::Forbidden("Player not in this room".to_string()));
        }
        match player.role {
            Some(role) => Ok((player, role)),
            None => Err(GameError::InvalidState(
                "Roles not yet assigned. Waiting for players...".to_string(),
            )),
        }
    }

    pub fn submit_guess(
        &self,
        room_id: &str,
        mantri_player_id: &str,
        guessed_player_id: &str,
    ) -> Result<GameResult, GameError> {
        let lock = self.room_lock(room_id);
        let _guard = lock.lock().unwrap();

        let mut room = self.get_room(room_id)?;
        if room.status != RoomStatus::Playing {
            return Err(GameError::InvalidState("Game not in progress".to_string()));
        }

        let mantri = self
            .store
            .get_player(mantri_player_id)
            .filter(|p| p.room_id == room_id)
            .ok_or_else(|| GameError::Forbidden("Invalid mantri player".to_string()))?;
        if mantri.role != Some(Role::Mantri) {
            return Err(GameError::Forbidden(
                "Only Mantri can submit guess".to_string(),
            ));
        }

        let guessed = self
            .store
            .get_player(guessed_player_id)
            .filter(|p| p.room_id == room_id)
            .ok_or_else(|| GameError::InvalidInput("Invalid guessed player".to_string()))?;

        let mut players = self.store.get_players_in_room(room_id);
        let mut game = self
            .store
            .get_in_progress_game(room_id)
            .ok_or_else(|| GameError::NotFound("No active game found".to_string()))?;

        let (scores, guess_correct) =
            score_service::calculate_scores(&guessed.player_id, &game.chor_player_id);

        game.guessed_player_id = Some(guessed.player_id.clone());
        game.guess_correct = Some(guess_correct);
        game.raja_points = scores.raja;
        game.mantri_points = scores.mantri;
        game.chor_points = scores.chor;
        game.sipahi_points = scores.sipahi;
        game.status = GameStatus::Completed;

        score_service::apply_scores(&mut players, &scores);
        room.status = RoomStatus::Finished;

        // Validation is done; persist the whole transition.
        self.store.update_game(game.clone());
        self.store.update_players(&players);
        self.store.update_room(room);

        result_service::build_result(&players, &game)
    }

    pub fn get_result(&self, room_id: &str) -> Result<GameResult, GameError> {
        let room = self.get_room(room_id)?;
        if room.status != RoomStatus::Finished {
            return Err(GameError::InvalidState("Game not yet finished".to_string()));
        }

        let players = self.store.get_players_in_room(room_id);
        let game = self
            .store
            .get_game_by_room(room_id)
            .filter(|g| g.status == GameStatus::Completed)
            .ok_or_else(|| GameError::NotFound("No completed game found".to_string()))?;

        result_service::build_result(&players, &game)
    }

    pub fn leaderboard(&self, room_id: &str) -> Result<Vec<LeaderboardEntry>, GameError> {
        self.get_room(room_id)?;
        let players = self.store.get_players_in_room(room_id);
        Ok(result_service::build_leaderboard(&players))
    }
}

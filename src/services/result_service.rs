// services/result_service.rs

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::models::game::{Game, GameStatus};
use crate::models::player::{Player, Role};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerResult {
    pub player_id: String,
    pub name: String,
    pub role: Role,
    pub round_points: i32,
    pub total_points: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameResult {
    pub game_id: String,
    pub mantri_guess_correct: bool,
    pub players: Vec<PlayerResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_id: String,
    pub name: String,
    pub total_points: i32,
}

// Full reveal of a finished round. Roles stay hidden until the game has
// completed, so this refuses anything still in progress.
pub fn build_result(players: &[Player], game: &Game) -> Result<GameResult, GameError> {
    if game.status != GameStatus::Completed {
        return Err(GameError::InvalidState("Game not yet finished".to_string()));
    }

    let mut entries = Vec::with_capacity(players.len());
    for player in players {
        let role = player.role.ok_or_else(|| {
            GameError::InvalidState("Roles not yet assigned".to_string())
        })?;
        entries.push(PlayerResult {
            player_id: player.player_id.clone(),
            name: player.name.clone(),
            role,
            round_points: game.round_points(role),
            total_points: player.points,
        });
    }

    Ok(GameResult {
        game_id: game.game_id.clone(),
        mantri_guess_correct: game.guess_correct.unwrap_or(false),
        players: entries,
    })
}

// Standings by total points, highest first. The sort is stable, so equal
// totals keep their join order; ranks are the 1-based positions afterwards.
pub fn build_leaderboard(players: &[Player]) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| b.points.cmp(&a.points));

    ranked
        .iter()
        .enumerate()
        .map(|(i, player)| LeaderboardEntry {
            rank: i + 1,
            player_id: player.player_id.clone(),
            name: player.name.clone(),
            total_points: player.points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, points: i32) -> Player {
        let mut p = Player::new(name.to_string(), "room1".to_string());
        p.points = points;
        p
    }

    #[test]
    fn leaderboard_sorts_descending_with_one_based_ranks() {
        let players = vec![player("Alice", 0), player("Bob", 1300), player("Carol", 1000)];
        let board = build_leaderboard(&players);

        let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
        let ranks: Vec<usize> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn leaderboard_ties_keep_join_order() {
        let players = vec![
            player("Alice", 500),
            player("Bob", 500),
            player("Carol", 800),
            player("Dave", 500),
        ];
        let board = build_leaderboard(&players);

        let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob", "Dave"]);
        assert_eq!(
            board.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn result_refuses_in_progress_games() {
        let game = Game::new("room1".to_string(), "m".to_string(), "c".to_string());
        let err = build_result(&[], &game).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[test]
    fn result_maps_round_points_by_role() {
        let mut game = Game::new("room1".to_string(), "m".to_string(), "c".to_string());
        game.status = GameStatus::Completed;
        game.guess_correct = Some(false);
        game.raja_points = 1000;
        game.chor_points = 1300;

        let mut raja = player("Alice", 1000);
        raja.role = Some(Role::Raja);
        let mut chor = player("Bob", 1300);
        chor.role = Some(Role::Chor);

        let result = build_result(&[raja, chor], &game).unwrap();
        assert!(!result.mantri_guess_correct);
        assert_eq!(result.players[0].round_points, 1000);
        assert_eq!(result.players[1].round_points, 1300);
    }
}

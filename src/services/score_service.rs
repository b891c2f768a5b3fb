// services/score_service.rs

use crate::models::player::{Player, Role};

// Base amounts per role. These are part of the game's contract, not tunable
// configuration.
pub const RAJA_POINTS: i32 = 1000;
pub const MANTRI_POINTS: i32 = 800;
pub const CHOR_POINTS: i32 = 0;
pub const SIPAHI_POINTS: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScores {
    pub raja: i32,
    pub mantri: i32,
    pub chor: i32,
    pub sipahi: i32,
}

impl RoundScores {
    pub fn for_role(&self, role: Role) -> i32 {
        match role {
            Role::Raja => self.raja,
            Role::Mantri => self.mantri,
            Role::Chor => self.chor,
            Role::Sipahi => self.sipahi,
        }
    }
}

// The guess is correct when it names the Chor. A correct guess pays every
// role its base amount; a wrong one hands the Chor the Mantri's and Sipahi's
// bases and pays those two nothing. The Raja scores either way.
pub fn calculate_scores(guessed_player_id: &str, chor_player_id: &str) -> (RoundScores, bool) {
    let guess_correct = guessed_player_id == chor_player_id;
    let scores = if guess_correct {
        RoundScores {
            raja: RAJA_POINTS,
            mantri: MANTRI_POINTS,
            chor: CHOR_POINTS,
            sipahi: SIPAHI_POINTS,
        }
    } else {
        RoundScores {
            raja: RAJA_POINTS,
            mantri: 0,
            chor: MANTRI_POINTS + SIPAHI_POINTS,
            sipahi: 0,
        }
    };
    (scores, guess_correct)
}

// Adds each player's per-role amount to their running total. Called exactly
// once per completed game; the lifecycle's one-way status transition is what
// enforces that.
pub fn apply_scores(players: &mut [Player], scores: &RoundScores) {
    for player in players.iter_mut() {
        if let Some(role) = player.role {
            player.points += scores.for_role(role);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_guess_pays_base_amounts() {
        let (scores, correct) = calculate_scores("chor-id", "chor-id");
        assert!(correct);
        assert_eq!(scores.raja, 1000);
        assert_eq!(scores.mantri, 800);
        assert_eq!(scores.chor, 0);
        assert_eq!(scores.sipahi, 500);
    }

    #[test]
    fn wrong_guess_pays_the_chor_the_stolen_pool() {
        let (scores, correct) = calculate_scores("raja-id", "chor-id");
        assert!(!correct);
        assert_eq!(scores.raja, 1000);
        assert_eq!(scores.mantri, 0);
        assert_eq!(scores.chor, 1300);
        assert_eq!(scores.sipahi, 0);
    }

    #[test]
    fn apply_scores_accumulates_by_role() {
        let mut players: Vec<Player> = Role::ALL
            .iter()
            .map(|role| {
                let mut p = Player::new(format!("{:?}", role), "room1".to_string());
                p.role = Some(*role);
                p.points = 10;
                p
            })
            .collect();

        let (scores, _) = calculate_scores("wrong", "chor-id");
        apply_scores(&mut players, &scores);

        let points: Vec<i32> = players.iter().map(|p| p.points).collect();
        assert_eq!(points, vec![1010, 10, 1310, 10]);
    }

    #[test]
    fn players_without_roles_are_untouched() {
        let mut players = vec![Player::new("Alice".to_string(), "room1".to_string())];
        let (scores, _) = calculate_scores("chor-id", "chor-id");
        apply_scores(&mut players, &scores);
        assert_eq!(players[0].points, 0);
    }
}

// services/role_service.rs

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::GameError;
use crate::models::player::{Player, Role};

// Assigns the four roles to the four players as a uniformly random
// permutation, in input order, and resets everyone's points for the new
// round. Drawing a permutation (rather than four independent picks) is what
// guarantees no role repeats. The RNG is injected so tests can seed it.
pub fn assign_roles<R: Rng>(players: &mut [Player], rng: &mut R) -> Result<(), GameError> {
    if players.len() != Role::ALL.len() {
        return Err(GameError::InvalidInput(format!(
            "Exactly 4 players required for role assignment, got {}",
            players.len()
        )));
    }

    let mut roles = Role::ALL;
    roles.shuffle(rng);

    for (player, role) in players.iter_mut().zip(roles) {
        player.role = Some(role);
        player.points = 0;
    }
    Ok(())
}

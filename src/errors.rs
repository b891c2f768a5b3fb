// errors.rs

use std::fmt;

use rocket::http::Status;

// Every precondition violation maps to exactly one of these; none of them
// leaves the store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    // Room, player or game missing, or a cross-room reference
    NotFound(String),
    // Operation attempted outside its required room/game status
    InvalidState(String),
    // Missing or malformed caller input, wrong player count
    InvalidInput(String),
    // Caller exists but is not allowed to perform the operation
    Forbidden(String),
}

impl GameError {
    pub fn status(&self) -> Status {
        match self {
            GameError::NotFound(_) => Status::NotFound,
            GameError::InvalidState(_) | GameError::InvalidInput(_) => Status::BadRequest,
            GameError::Forbidden(_) => Status::Forbidden,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotFound(msg)
            | GameError::InvalidState(msg)
            | GameError::InvalidInput(msg)
            | GameError::Forbidden(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_expected_statuses() {
        assert_eq!(GameError::NotFound("x".into()).status(), Status::NotFound);
        assert_eq!(
            GameError::InvalidState("x".into()).status(),
            Status::BadRequest
        );
        assert_eq!(
            GameError::InvalidInput("x".into()).status(),
            Status::BadRequest
        );
        assert_eq!(GameError::Forbidden("x".into()).status(), Status::Forbidden);
    }
}

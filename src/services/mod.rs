pub mod game_service;
pub mod result_service;
pub mod role_service;
pub mod score_service;

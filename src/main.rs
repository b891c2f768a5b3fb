#[macro_use]
extern crate rocket;

mod errors;
mod models;
mod repository;
mod services;

use chrono::Utc;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{Build, Request, Response, Rocket, State};
use serde::{Deserialize, Serialize};

use errors::GameError;
use models::player::{PublicPlayer, Role};
use models::room::RoomStatus;
use repository::store::EntityStore;
use services::game_service::GameService;
use services::result_service::{GameResult, LeaderboardEntry};

// CORS fairing so browser clients can reach the API from any origin.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));
    }
}

#[options("/<_..>")]
fn all_options() -> Status {
    Status::Ok
}

// API response envelope
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub message: String,
    pub result: Option<T>,
}

fn error_response<T>(err: GameError) -> (Status, Json<ApiResponse<T>>) {
    (
        err.status(),
        Json(ApiResponse {
            message: err.to_string(),
            result: None,
        }),
    )
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CreateRoomRequest {
    pub player_name: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct JoinRoomRequest {
    pub room_id: String,
    pub player_name: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GuessRequest {
    pub mantri_player_id: String,
    pub guessed_player_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RoomCreated {
    pub room_id: String,
    pub player_id: String,
    pub player_name: String,
    pub players_joined: i32,
    pub waiting_for: i32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RoomJoined {
    pub room_id: String,
    pub player_id: String,
    pub player_name: String,
    pub players_joined: i32,
    pub waiting_for: i32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RoomPlayers {
    pub room_id: String,
    pub status: RoomStatus,
    pub player_count: usize,
    pub players: Vec<PublicPlayer>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RolesAssigned {
    pub room_id: String,
    pub status: RoomStatus,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MyRole {
    pub player_id: String,
    pub name: String,
    pub role: Role,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Leaderboard {
    pub room_id: String,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[post("/room/create", format = "json", data = "<request>")]
fn create_room(
    service: &State<GameService>,
    request: Json<CreateRoomRequest>,
) -> (Status, Json<ApiResponse<RoomCreated>>) {
    match service.create_room(&request.player_name) {
        Ok((room, player)) => (
            Status::Created,
            Json(ApiResponse {
                message: "Room created successfully".to_string(),
                result: Some(RoomCreated {
                    room_id: room.room_id,
                    player_id: player.player_id,
                    player_name: player.name,
                    players_joined: room.player_count,
                    waiting_for: 4 - room.player_count,
                }),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[post("/room/join", format = "json", data = "<request>")]
fn join_room(
    service: &State<GameService>,
    request: Json<JoinRoomRequest>,
) -> (Status, Json<ApiResponse<RoomJoined>>) {
    match service.join_room(&request.room_id, &request.player_name) {
        Ok(outcome) => {
            let message = if outcome.roles_assigned {
                "Joined room successfully. All players ready! Assigning roles..."
            } else {
                "Joined room successfully"
            };
            (
                Status::Ok,
                Json(ApiResponse {
                    message: message.to_string(),
                    result: Some(RoomJoined {
                        room_id: outcome.player.room_id.clone(),
                        player_id: outcome.player.player_id.clone(),
                        player_name: outcome.player.name.clone(),
                        players_joined: outcome.players_joined,
                        waiting_for: outcome.waiting_for,
                    }),
                }),
            )
        }
        Err(e) => error_response(e),
    }
}

#[get("/room/players/<room_id>")]
fn get_room_players(
    service: &State<GameService>,
    room_id: &str,
) -> (Status, Json<ApiResponse<RoomPlayers>>) {
    match service.list_players(room_id) {
        Ok((room, players)) => (
            Status::Ok,
            Json(ApiResponse {
                message: "200: Success".to_string(),
                result: Some(RoomPlayers {
                    room_id: room.room_id,
                    status: room.status,
                    player_count: players.len(),
                    players: players.iter().map(|p| p.to_public()).collect(),
                }),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[post("/room/assign/<room_id>")]
fn assign_roles(
    service: &State<GameService>,
    room_id: &str,
) -> (Status, Json<ApiResponse<RolesAssigned>>) {
    match service.assign_roles(room_id) {
        Ok(room) => (
            Status::Ok,
            Json(ApiResponse {
                message: "Roles assigned successfully".to_string(),
                result: Some(RolesAssigned {
                    room_id: room.room_id,
                    status: room.status,
                }),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[get("/role/me/<room_id>/<player_id>")]
fn get_my_role(
    service: &State<GameService>,
    room_id: &str,
    player_id: &str,
) -> (Status, Json<ApiResponse<MyRole>>) {
    match service.get_role(room_id, player_id) {
        Ok((player, role)) => (
            Status::Ok,
            Json(ApiResponse {
                message: "200: Success".to_string(),
                result: Some(MyRole {
                    player_id: player.player_id,
                    name: player.name,
                    role,
                    description: role.description().to_string(),
                }),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[post("/guess/<room_id>", format = "json", data = "<request>")]
fn submit_guess(
    service: &State<GameService>,
    room_id: &str,
    request: Json<GuessRequest>,
) -> (Status, Json<ApiResponse<GameResult>>) {
    match service.submit_guess(room_id, &request.mantri_player_id, &request.guessed_player_id) {
        Ok(result) => (
            Status::Ok,
            Json(ApiResponse {
                message: "Guess submitted successfully".to_string(),
                result: Some(result),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[get("/result/<room_id>")]
fn get_result(
    service: &State<GameService>,
    room_id: &str,
) -> (Status, Json<ApiResponse<GameResult>>) {
    match service.get_result(room_id) {
        Ok(result) => (
            Status::Ok,
            Json(ApiResponse {
                message: "200: Success".to_string(),
                result: Some(result),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[get("/leaderboard/<room_id>")]
fn get_leaderboard(
    service: &State<GameService>,
    room_id: &str,
) -> (Status, Json<ApiResponse<Leaderboard>>) {
    match service.leaderboard(room_id) {
        Ok(entries) => (
            Status::Ok,
            Json(ApiResponse {
                message: "200: Success".to_string(),
                result: Some(Leaderboard {
                    room_id: room_id.to_string(),
                    leaderboard: entries,
                }),
            }),
        ),
        Err(e) => error_response(e),
    }
}

#[get("/health")]
fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        message: "Raja-Mantri-Chor-Sipahi Backend is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        message: format!("404: '{}' route not found", req.uri()),
        result: None,
    })
}

fn rocket_app(service: GameService) -> Rocket<Build> {
    rocket::build()
        .manage(service)
        .attach(Cors)
        .mount(
            "/",
            routes![
                all_options,
                create_room,
                join_room,
                get_room_players,
                assign_roles,
                get_my_role,
                submit_guess,
                get_result,
                get_leaderboard,
                health,
            ],
        )
        .register("/", catchers![not_found])
}

#[launch]
fn rocket() -> _ {
    rocket_app(GameService::new(EntityStore::new()))
}

//! JSON-over-HTTP front end for a single shared game.
//!
//! The page at `/` posts moves to `/move`; every rule decision is made by
//! `GameState::make_move`. Refused moves come back as `422` with the reason's
//! variant name and message.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::IllegalMoveReason;
use crate::game_state::{game_state::GameState, xiangqi_types::*};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<GameState>>,
}

impl AppState {
    pub fn new(game_state: GameState) -> Self {
        Self {
            game: Arc::new(Mutex::new(game_state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveRequest {
    pub file_from: i64,
    pub rank_from: i64,
    pub file_to: i64,
    pub rank_to: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IllegalMoveReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok",
            valid: true,
            reason: None,
            message: None,
        }
    }

    fn refused(reason: IllegalMoveReason) -> Self {
        Self {
            status: "error",
            valid: false,
            reason: Some(reason),
            message: Some(reason.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub board: String,
    pub turn: Color,
    pub ply: usize,
}

#[derive(Debug, Serialize)]
pub struct MovesResponse {
    pub turn: Color,
    pub moves: Vec<(u8, u8, u8, u8)>,
}

type StatusReply = (StatusCode, Json<StatusResponse>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/move", post(submit_move))
        .route("/board", get(board))
        .route("/moves", get(moves))
        .route("/undo", post(undo))
        .route("/reset", post(reset))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn submit_move(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> StatusReply {
    let result = request_coordinates(request).and_then(|(ff, fr, tf, tr)| {
        let mut game = state.lock();
        game.make_move(ff, fr, tf, tr)
    });

    match result {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::ok())),
        Err(reason) => refusal(reason),
    }
}

async fn board(State(state): State<AppState>) -> Json<BoardResponse> {
    let game = state.lock();
    Json(BoardResponse {
        board: game.render(),
        turn: game.side_to_move(),
        ply: game.ply(),
    })
}

async fn moves(State(state): State<AppState>) -> Json<MovesResponse> {
    let game = state.lock();
    Json(MovesResponse {
        turn: game.side_to_move(),
        moves: game.legal_move_tuples(),
    })
}

async fn undo(State(state): State<AppState>) -> StatusReply {
    let result = state.lock().undo_move();
    match result {
        Ok(_) => (StatusCode::OK, Json(StatusResponse::ok())),
        Err(reason) => refusal(reason),
    }
}

async fn reset(State(state): State<AppState>) -> StatusReply {
    *state.lock() = GameState::new_game();
    info!("game reset to the starting position");
    (StatusCode::OK, Json(StatusResponse::ok()))
}

fn refusal(reason: IllegalMoveReason) -> StatusReply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(StatusResponse::refused(reason)),
    )
}

/// Narrows the wire integers to board coordinates. A request naming the same
/// square twice is a null move even when that square is off the board.
fn request_coordinates(request: MoveRequest) -> Result<(u8, u8, u8, u8), IllegalMoveReason> {
    let MoveRequest {
        file_from,
        rank_from,
        file_to,
        rank_to,
    } = request;

    if (file_from, rank_from) == (file_to, rank_to) {
        return Err(IllegalMoveReason::NullMove);
    }

    let narrow = |value: i64| u8::try_from(value).map_err(|_| IllegalMoveReason::OutOfBounds);
    Ok((
        narrow(file_from)?,
        narrow(rank_from)?,
        narrow(file_to)?,
        narrow(rank_to)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .expect("request should build");

        let response = app.oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn move_body(ff: i64, fr: i64, tf: i64, tr: i64) -> Option<Value> {
        Some(json!({ "file_from": ff, "rank_from": fr, "file_to": tf, "rank_to": tr }))
    }

    #[tokio::test]
    async fn legal_move_is_accepted_and_flips_turn() {
        let state = AppState::new(GameState::new_game());

        let (status, body) = send(router(state.clone()), "POST", "/move", move_body(4, 3, 4, 4)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "valid": true }));

        let (status, body) = send(router(state), "GET", "/board", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["turn"], "black");
        assert_eq!(body["ply"], 1);
    }

    #[tokio::test]
    async fn illegal_move_reports_reason() {
        let state = AppState::new(GameState::new_game());

        let (status, body) = send(router(state.clone()), "POST", "/move", move_body(1, 0, 1, 1)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["valid"], false);
        assert_eq!(body["reason"], "WrongShape");
        assert!(body["message"].as_str().is_some());

        let (_, body) = send(router(state.clone()), "POST", "/move", move_body(-1, 0, 0, 0)).await;
        assert_eq!(body["reason"], "OutOfBounds");

        let (_, body) = send(router(state.clone()), "POST", "/move", move_body(20, 20, 20, 20)).await;
        assert_eq!(body["reason"], "NullMove");

        assert_eq!(*state.lock(), GameState::new_game());
    }

    #[tokio::test]
    async fn undo_and_reset() {
        let state = AppState::new(GameState::new_game());

        let (status, body) = send(router(state.clone()), "POST", "/undo", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["reason"], "NoHistory");

        send(router(state.clone()), "POST", "/move", move_body(0, 3, 0, 4)).await;
        let (status, _) = send(router(state.clone()), "POST", "/undo", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(*state.lock(), GameState::new_game());

        send(router(state.clone()), "POST", "/move", move_body(0, 3, 0, 4)).await;
        let (status, _) = send(router(state.clone()), "POST", "/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(*state.lock(), GameState::new_game());
    }

    #[tokio::test]
    async fn moves_lists_forty_four_opening_moves() {
        let state = AppState::new(GameState::new_game());
        let (status, body) = send(router(state), "GET", "/moves", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["turn"], "red");
        assert_eq!(body["moves"].as_array().map(Vec::len), Some(44));
    }

    #[tokio::test]
    async fn index_serves_page() {
        let response = router(AppState::new(GameState::new_game()))
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{error, instrument, warn};

use crate::{
    auth::session::CurrentAccount,
    games::{
        dto::{AddGameRequest, DashboardResponse, GameListItem},
        repo::GameRecord,
        services::{self, AddGame, AddGameError},
    },
    state::AppState,
};

pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(list_games).post(add_game))
        .route("/games/:id", delete(delete_game))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

#[instrument(skip(state, account))]
pub async fn list_games(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<Vec<GameListItem>>, (StatusCode, String)> {
    let games = GameRecord::list_by_owner(&state.db, account.id)
        .await
        .map_err(internal)?;
    Ok(Json(games.into_iter().map(GameListItem::from).collect()))
}

#[instrument(skip(state, account, payload))]
pub async fn add_game(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(payload): Json<AddGameRequest>,
) -> Result<(StatusCode, Json<GameListItem>), (StatusCode, String)> {
    let input = AddGame {
        title: payload.title,
        genre: payload.genre,
        year: payload.year,
        status: payload.status,
        rating: payload.rating,
    };

    let game = match services::add(&state.db, &account, input).await {
        Ok(g) => g,
        Err(AddGameError::Store(e)) => return Err(internal(e)),
        Err(e) => {
            warn!(%e, account_id = account.id, "add game rejected");
            return Err((StatusCode::BAD_REQUEST, e.to_string()));
        }
    };

    Ok((StatusCode::CREATED, Json(GameListItem::from(game))))
}

#[instrument(skip(state, account))]
pub async fn delete_game(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    services::delete(&state.db, &account, id)
        .await
        .map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, account))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let games = GameRecord::list_by_owner(&state.db, account.id)
        .await
        .map_err(internal)?;

    let stats = services::compute_stats(&games);
    let recent = games
        .into_iter()
        .take(5)
        .map(GameListItem::from)
        .collect();

    Ok(Json(DashboardResponse { stats, recent }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "something went wrong, try again later".into(),
    )
}

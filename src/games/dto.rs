use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::games::repo::{GameRecord, GameStatus};
use crate::games::services::LibraryStats;

/// Request body for adding a game. Everything but the title is optional.
#[derive(Debug, Deserialize)]
pub struct AddGameRequest {
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub rating: i32,
}

#[derive(Debug, Serialize)]
pub struct GameListItem {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub status: GameStatus,
    pub rating: i32,
    pub created_at: OffsetDateTime,
}

impl From<GameRecord> for GameListItem {
    fn from(g: GameRecord) -> Self {
        Self {
            id: g.id,
            title: g.title,
            genre: g.genre,
            year: g.year,
            status: g.status,
            rating: g.rating,
            created_at: g.created_at,
        }
    }
}

/// Stats plus the five most recently added games.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: LibraryStats,
    pub recent: Vec<GameListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_game_request_fills_defaults() {
        let req: AddGameRequest = serde_json::from_str(r#"{"title":"Celeste"}"#).unwrap();
        assert_eq!(req.title, "Celeste");
        assert!(req.genre.is_none());
        assert!(req.year.is_none());
        assert_eq!(req.status, GameStatus::Planned);
        assert_eq!(req.rating, 0);
    }
}

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Play status of a library entry. Closed set; the wire values are the
/// literal variant names.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "game_status")]
pub enum GameStatus {
    #[default]
    Planned,
    Playing,
    Completed,
}

/// Game record in the database, always owned by exactly one account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameRecord {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub status: GameStatus,
    pub rating: i32,
    pub created_at: OffsetDateTime,
}

/// Validated fields for a new record; produced by the service layer.
#[derive(Debug)]
pub struct NewGameRecord {
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub status: GameStatus,
    pub rating: i32,
}

impl GameRecord {
    pub async fn insert(
        db: &PgPool,
        owner_id: i64,
        record: &NewGameRecord,
    ) -> anyhow::Result<GameRecord> {
        let row = sqlx::query_as::<_, GameRecord>(
            r#"
            INSERT INTO games (owner_id, title, genre, year, status, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, genre, year, status, rating, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&record.title)
        .bind(&record.genre)
        .bind(record.year)
        .bind(record.status)
        .bind(record.rating)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<Vec<GameRecord>> {
        let rows = sqlx::query_as::<_, GameRecord>(
            r#"
            SELECT id, owner_id, title, genre, year, status, rating, created_at
            FROM games
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Delete a record only when it exists and belongs to the owner.
    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_owned(db: &PgPool, owner_id: i64, game_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM games
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(game_id)
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_are_fixed() {
        assert_eq!(serde_json::to_string(&GameStatus::Planned).unwrap(), "\"Planned\"");
        assert_eq!(serde_json::to_string(&GameStatus::Playing).unwrap(), "\"Playing\"");
        assert_eq!(
            serde_json::to_string(&GameStatus::Completed).unwrap(),
            "\"Completed\""
        );
    }

    #[test]
    fn status_rejects_free_text() {
        assert!(serde_json::from_str::<GameStatus>("\"Backlog\"").is_err());
        assert!(serde_json::from_str::<GameStatus>("\"planned\"").is_err());
    }

    #[test]
    fn status_defaults_to_planned() {
        assert_eq!(GameStatus::default(), GameStatus::Planned);
    }
}

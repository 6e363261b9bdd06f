use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::auth::repo::Account;
use crate::games::repo::{GameRecord, GameStatus, NewGameRecord};

#[derive(Debug, Error)]
pub enum AddGameError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("could not save the game")]
    Store(#[from] anyhow::Error),
}

/// Raw add-game fields as submitted, before any normalization.
#[derive(Debug)]
pub struct AddGame {
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub status: GameStatus,
    pub rating: i32,
}

/// Library statistics for one account.
#[derive(Debug, Serialize, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    pub completed: usize,
    pub playing: usize,
    pub planned: usize,
    pub avg_rating: f64,
}

pub async fn add(
    db: &PgPool,
    account: &Account,
    input: AddGame,
) -> Result<GameRecord, AddGameError> {
    let record = prepare_record(input)?;
    let record = GameRecord::insert(db, account.id, &record)
        .await
        .map_err(AddGameError::Store)?;
    debug!(account_id = account.id, game_id = record.id, title = %record.title, "game added");
    Ok(record)
}

/// Normalize submitted fields into a persistable record.
fn prepare_record(input: AddGame) -> Result<NewGameRecord, AddGameError> {
    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(AddGameError::EmptyTitle);
    }

    let genre = input
        .genre
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty());

    // Years at or before 1900 are treated as not provided.
    let year = input.year.filter(|y| *y > 1900);

    // Zero means unrated and is stored untouched; only nonzero ratings are
    // forced into range. Keep the branch as-is: collapsing it into an
    // unconditional clamp changes which path a zero takes.
    let rating = if input.rating != 0 {
        input.rating.clamp(0, 10)
    } else {
        input.rating
    };

    Ok(NewGameRecord {
        title,
        genre,
        year,
        status: input.status,
        rating,
    })
}

/// Delete an owned record. Unknown ids and records owned by someone else
/// are silently ignored, so repeated deletes are safe.
pub async fn delete(db: &PgPool, account: &Account, game_id: i64) -> anyhow::Result<()> {
    let removed = GameRecord::delete_owned(db, account.id, game_id).await?;
    if removed == 0 {
        debug!(account_id = account.id, game_id, "delete matched no owned record");
    }
    Ok(())
}

/// Aggregate stats over an account's records. The average counts rated
/// games only (rating > 0) and is rounded to one decimal place.
pub fn compute_stats(records: &[GameRecord]) -> LibraryStats {
    let rated: Vec<i32> = records
        .iter()
        .map(|g| g.rating)
        .filter(|r| *r > 0)
        .collect();
    let avg_rating = if rated.is_empty() {
        0.0
    } else {
        let mean = rated.iter().sum::<i32>() as f64 / rated.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    LibraryStats {
        total: records.len(),
        completed: count_status(records, GameStatus::Completed),
        playing: count_status(records, GameStatus::Playing),
        planned: count_status(records, GameStatus::Planned),
        avg_rating,
    }
}

fn count_status(records: &[GameRecord], status: GameStatus) -> usize {
    records.iter().filter(|g| g.status == status).count()
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn add_game(title: &str, rating: i32) -> AddGame {
        AddGame {
            title: title.into(),
            genre: None,
            year: None,
            status: GameStatus::Planned,
            rating,
        }
    }

    fn game(status: GameStatus, rating: i32) -> GameRecord {
        GameRecord {
            id: 0,
            owner_id: 1,
            title: "some game".into(),
            genre: None,
            year: None,
            status,
            rating,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn title_is_trimmed() {
        let record = prepare_record(add_game("  Hollow Knight  ", 0)).unwrap();
        assert_eq!(record.title, "Hollow Knight");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(
            prepare_record(add_game("   ", 0)),
            Err(AddGameError::EmptyTitle)
        ));
    }

    #[test]
    fn genre_is_trimmed_and_blank_genre_becomes_absent() {
        let mut input = add_game("Doom", 0);
        input.genre = Some("  FPS  ".into());
        assert_eq!(prepare_record(input).unwrap().genre.as_deref(), Some("FPS"));

        let mut input = add_game("Doom", 0);
        input.genre = Some("   ".into());
        assert_eq!(prepare_record(input).unwrap().genre, None);
    }

    #[test]
    fn year_must_be_after_1900() {
        let mut input = add_game("Myst", 0);
        input.year = Some(1993);
        assert_eq!(prepare_record(input).unwrap().year, Some(1993));

        let mut input = add_game("Myst", 0);
        input.year = Some(1900);
        assert_eq!(prepare_record(input).unwrap().year, None);
    }

    #[test]
    fn oversized_rating_clamps_to_ten() {
        assert_eq!(prepare_record(add_game("Celeste", 15)).unwrap().rating, 10);
    }

    #[test]
    fn negative_rating_clamps_to_zero() {
        assert_eq!(prepare_record(add_game("Celeste", -3)).unwrap().rating, 0);
    }

    #[test]
    fn zero_rating_bypasses_the_clamp() {
        assert_eq!(prepare_record(add_game("Celeste", 0)).unwrap().rating, 0);
    }

    #[test]
    fn stats_average_counts_rated_games_only() {
        let records = vec![
            game(GameStatus::Planned, 0),
            game(GameStatus::Playing, 0),
            game(GameStatus::Completed, 8),
            game(GameStatus::Completed, 10),
        ];

        let stats = compute_stats(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.playing, 1);
        assert_eq!(stats.planned, 1);
        assert_eq!(stats.avg_rating, 9.0);
    }

    #[test]
    fn stats_average_is_rounded_to_one_decimal() {
        let records = vec![
            game(GameStatus::Completed, 7),
            game(GameStatus::Completed, 8),
            game(GameStatus::Completed, 8),
        ];
        assert_eq!(compute_stats(&records).avg_rating, 7.7);
    }

    #[test]
    fn stats_with_no_rated_games_average_zero() {
        let records = vec![game(GameStatus::Planned, 0)];
        let stats = compute_stats(&records);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn stats_on_empty_library() {
        let stats = compute_stats(&[]);
        assert_eq!(
            stats,
            LibraryStats {
                total: 0,
                completed: 0,
                playing: 0,
                planned: 0,
                avg_rating: 0.0,
            }
        );
    }
}

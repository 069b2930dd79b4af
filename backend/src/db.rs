use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::structs::{NewNote, Note, NotePatch, NoteVector};

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Opens (creating if needed) the database at `url` and applies migrations.
pub async fn connect(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// A private in-memory database. Every connection to `:memory:` is its own
/// database, so the pool is pinned to a single connection that never expires.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub async fn list_notes(pool: &SqlitePool) -> anyhow::Result<NoteVector> {
    let notes = sqlx::query_as::<_, Note>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

/// Case-insensitive substring match on title or content, newest first.
/// SQLite's `lower()` only folds ASCII, so the match runs over the listed rows.
pub async fn search_notes(pool: &SqlitePool, query: &str) -> anyhow::Result<NoteVector> {
    let query = query.to_lowercase();
    let mut notes = list_notes(pool).await?;
    notes.retain(|note| {
        note.title.to_lowercase().contains(&query) || note.content.to_lowercase().contains(&query)
    });

    Ok(notes)
}

pub async fn get_note(pool: &SqlitePool, id: &str) -> anyhow::Result<Option<Note>> {
    let note = sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(note)
}

/// Inserts every row in one transaction and returns them as stored.
pub async fn create_notes(pool: &SqlitePool, rows: &[NewNote]) -> anyhow::Result<NoteVector> {
    let mut tx = pool.begin().await?;
    let mut created = NoteVector::with_capacity(rows.len());

    for row in rows {
        let now = Utc::now();
        let note = sqlx::query_as::<_, Note>(&format!(
            r#"
            INSERT INTO notes ( id, title, content, created_at, updated_at )
            VALUES ( ?1, ?2, ?3, ?4, ?4 )
            RETURNING {NOTE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(row.title.trim())
        .bind(row.content.trim())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        created.push(note);
    }

    tx.commit().await?;
    Ok(created)
}

/// Applies `patch` and refreshes `updated_at`. `None` when no row has `id`.
pub async fn update_note(pool: &SqlitePool, id: &str, patch: &NotePatch) -> anyhow::Result<Option<Note>> {
    let note = sqlx::query_as::<_, Note>(&format!(
        r#"
        UPDATE notes
        SET title = COALESCE(?1, title), content = COALESCE(?2, content), updated_at = ?3
        WHERE id = ?4
        RETURNING {NOTE_COLUMNS}
        "#
    ))
    .bind(patch.title.as_deref().map(str::trim))
    .bind(patch.content.as_deref().map(str::trim))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(note)
}

pub async fn delete_note(pool: &SqlitePool, id: &str) -> anyhow::Result<bool> {
    let rows_affected = sqlx::query("DELETE FROM notes WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(rows_affected > 0)
}

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::structs::{NewNote, Note, NotePatch, NoteVector};

type ApiResult<T> = Result<T, Status>;

fn internal(operation: &str, err: anyhow::Error) -> Status {
    log::error!("{} failed: {:#}", operation, err);
    Status::InternalServerError
}

fn rejected(operation: &str, reason: &str) -> Status {
    log::warn!("{} rejected: {}", operation, reason);
    Status::BadRequest
}

#[get("/health")]
pub fn health() -> &'static str {
    "ok"
}

#[get("/notes")]
pub async fn list_notes(pool: &State<SqlitePool>) -> ApiResult<Json<NoteVector>> {
    let notes = db::list_notes(pool).await.map_err(|err| internal("list", err))?;
    Ok(Json(notes))
}

#[get("/notes/search?<q>")]
pub async fn search_notes(pool: &State<SqlitePool>, q: Option<&str>) -> ApiResult<Json<NoteVector>> {
    let query = q.unwrap_or_default();
    if query.is_empty() {
        return Ok(Json(NoteVector::new()));
    }

    let notes = db::search_notes(pool, query).await.map_err(|err| internal("search", err))?;
    Ok(Json(notes))
}

#[get("/notes/<id>")]
pub async fn get_note(pool: &State<SqlitePool>, id: &str) -> ApiResult<Json<Note>> {
    match db::get_note(pool, id).await.map_err(|err| internal("get", err))? {
        Some(note) => Ok(Json(note)),
        None => Err(Status::NotFound),
    }
}

#[post("/notes", data = "<rows>")]
pub async fn create_notes(
    pool: &State<SqlitePool>,
    rows: Json<Vec<NewNote>>,
) -> ApiResult<status::Created<Json<NoteVector>>> {
    let rows = rows.into_inner();
    if rows.is_empty() {
        return Err(rejected("insert", "no rows"));
    }
    for row in &rows {
        row.validate().map_err(|reason| rejected("insert", reason))?;
    }

    let created = db::create_notes(pool, &rows).await.map_err(|err| internal("insert", err))?;
    log::info!("inserted {} note(s)", created.len());
    Ok(status::Created::new("/notes").body(Json(created)))
}

#[patch("/notes/<id>", data = "<patch>")]
pub async fn update_note(pool: &State<SqlitePool>, id: &str, patch: Json<NotePatch>) -> ApiResult<Json<Note>> {
    patch.validate().map_err(|reason| rejected("update", reason))?;

    match db::update_note(pool, id, &patch).await.map_err(|err| internal("update", err))? {
        Some(note) => Ok(Json(note)),
        None => Err(Status::NotFound),
    }
}

#[delete("/notes/<id>")]
pub async fn delete_note(pool: &State<SqlitePool>, id: &str) -> Status {
    match db::delete_note(pool, id).await {
        Ok(true) => Status::NoContent,
        Ok(false) => Status::NotFound,
        Err(err) => internal("delete", err),
    }
}

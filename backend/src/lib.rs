#[macro_use]
extern crate rocket;

pub mod config;
pub mod cors;
pub mod db;
pub mod routes;
pub mod structs;

use rocket::figment::Figment;
use rocket::{Build, Rocket};
use sqlx::sqlite::SqlitePool;

use config::Settings;
use cors::Cors;

/// Assembles the notes service around an open pool.
pub fn build(figment: Figment, settings: &Settings, pool: SqlitePool) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors::new(settings.allowed_origin.as_str()))
        .manage::<SqlitePool>(pool)
        .mount("/", routes![
            routes::health,
            routes::list_notes,
            routes::search_notes,
            routes::get_note,
            routes::create_notes,
            routes::update_note,
            routes::delete_note,
            cors::preflight,
        ])
}

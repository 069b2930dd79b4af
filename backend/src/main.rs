use dotenv::dotenv;

use notes_backend::config::Settings;
use notes_backend::db;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let figment = Settings::figment();
    let settings = Settings::from_figment(&figment)?;
    let pool = db::connect(&settings.database_url).await?;

    if let Err(err) = notes_backend::build(figment, &settings, pool).launch().await {
        // Inspecting the kind marks the error as handled.
        anyhow::bail!("server stopped: {}", err.kind());
    }
    Ok(())
}

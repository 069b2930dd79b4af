use rocket::figment::providers::Env;
use rocket::figment::Figment;
use serde::Deserialize;

/// Application settings layered on top of Rocket's own configuration.
///
/// Read from `Rocket.toml`, `ROCKET_*` variables, and the raw `DATABASE_URL`
/// and `ALLOWED_ORIGIN` variables (a `.env` file is loaded first by `main`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_database_url() -> String {
    "sqlite://notes.db".into()
}

fn default_allowed_origin() -> String {
    "*".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl Settings {
    pub fn figment() -> Figment {
        rocket::Config::figment().merge(Env::raw().only(&["database_url", "allowed_origin"]))
    }

    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        figment
            .extract()
            .map_err(|err| anyhow::anyhow!("invalid configuration: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::figment::providers::Serialized;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = Settings::from_figment(&Figment::new()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn provided_keys_override_defaults() {
        let figment = Figment::new().merge(Serialized::default("allowed_origin", "http://localhost:8080"));
        let settings = Settings::from_figment(&figment).unwrap();
        assert_eq!(settings.allowed_origin, "http://localhost:8080");
        assert_eq!(settings.database_url, "sqlite://notes.db");
    }
}

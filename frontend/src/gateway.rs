//! Persistence gateway: request/response calls against the notes table API.

use anyhow::bail;
use gloo_net::http::{Request as HttpRequest, Response};

use crate::state::{Outcome, Request};
use crate::structs::{NewNote, Note, NotePatch, NoteVector};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct Gateway {
    base_url: String,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(option_env!("NOTES_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Runs a state container request and reports what came back.
    pub async fn perform(&self, request: Request) -> anyhow::Result<Outcome> {
        let outcome = match request {
            Request::List => Outcome::Listed(self.list().await?),
            Request::Insert(rows) => Outcome::Inserted(self.insert(&rows).await?),
            Request::Update { id, patch } => Outcome::Updated(self.update(&id, &patch).await?),
            Request::Delete(id) => {
                self.delete(&id).await?;
                Outcome::Deleted(id)
            }
        };
        Ok(outcome)
    }

    /// Every note, newest first.
    pub async fn list(&self) -> anyhow::Result<NoteVector> {
        let response = HttpRequest::get(&self.url("/notes")).send().await?;
        Ok(success(response)?.json().await?)
    }

    /// Returns the rows as stored, with their assigned ids and timestamps.
    pub async fn insert(&self, rows: &[NewNote]) -> anyhow::Result<NoteVector> {
        let response = HttpRequest::post(&self.url("/notes")).json(&rows)?.send().await?;
        Ok(success(response)?.json().await?)
    }

    pub async fn update(&self, id: &str, patch: &NotePatch) -> anyhow::Result<Note> {
        let response = HttpRequest::patch(&self.url(&format!("/notes/{}", id)))
            .json(patch)?
            .send()
            .await?;
        Ok(success(response)?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        let response = HttpRequest::delete(&self.url(&format!("/notes/{}", id))).send().await?;
        success(response)?;
        Ok(())
    }
}

fn success(response: Response) -> anyhow::Result<Response> {
    check_status(&response.url(), response.status(), &response.status_text())?;
    Ok(response)
}

/// Anything outside 2xx is an error naming the url and status.
fn check_status(url: &str, status: u16, status_text: &str) -> anyhow::Result<()> {
    if !(200..300).contains(&status) {
        bail!("{} returned {} {}", url, status, status_text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let gateway = Gateway::new("http://localhost:8000//");
        assert_eq!(gateway.url("/notes"), "http://localhost:8000/notes");
    }

    #[test]
    fn success_statuses_pass() {
        assert!(check_status("http://localhost:8000/notes", 200, "OK").is_ok());
        assert!(check_status("http://localhost:8000/notes", 201, "Created").is_ok());
        assert!(check_status("http://localhost:8000/notes/a", 204, "No Content").is_ok());
    }

    #[test]
    fn error_statuses_carry_the_status() {
        let err = check_status("http://localhost:8000/notes/a", 404, "Not Found").unwrap_err();
        assert_eq!(err.to_string(), "http://localhost:8000/notes/a returned 404 Not Found");

        let err = check_status("http://localhost:8000/notes", 500, "Internal Server Error").unwrap_err();
        assert!(err.to_string().contains("500"));
        assert!(check_status("http://localhost:8000/notes", 302, "Found").is_err());
    }

    #[test]
    fn default_points_at_local_backend() {
        if option_env!("NOTES_API_URL").is_none() {
            assert_eq!(Gateway::default(), Gateway::new(DEFAULT_API_URL));
        }
    }
}

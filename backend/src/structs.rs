use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `notes` table as it goes over the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. Id and timestamps are assigned on write.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewNote {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NewNote {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title must not be blank");
        }
        Ok(())
    }
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.is_empty() {
            return Err("patch has no fields");
        }
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err("title must not be blank");
        }
        Ok(())
    }
}

pub type NoteVector = Vec<Note>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_content_defaults_to_empty() {
        let note: NewNote = serde_json::from_str(r#"{"title":"groceries"}"#).unwrap();
        assert_eq!(note.content, "");
        assert!(note.validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let note = NewNote { title: "   ".into(), content: "body".into() };
        assert!(note.validate().is_err());

        let patch = NotePatch { title: Some("\t".into()), content: None };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        let patch: NotePatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_err());

        let patch = NotePatch { title: None, content: Some(String::new()) };
        assert!(patch.validate().is_ok());
    }
}

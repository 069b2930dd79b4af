//! Application state container.
//!
//! Holds the in-memory note list, the form, the active view and the loading
//! flag. User actions either mutate local state or hand back a [`Request`]
//! for the gateway. Whatever the gateway returns comes back through
//! [`State::apply`] or [`State::failed`].

use chrono::{DateTime, Utc};

use crate::filter::{self, View};
use crate::structs::{NewNote, Note, NoteId, NotePatch, NoteVector};

/// Whether a submit creates a note or updates the one being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Creating,
    Editing(NoteId),
}

/// A persistence call the gateway should perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    List,
    Insert(Vec<NewNote>),
    Update { id: NoteId, patch: NotePatch },
    Delete(NoteId),
}

impl Request {
    pub fn operation(&self) -> &'static str {
        match self {
            Request::List => "fetch notes",
            Request::Insert(_) => "create note",
            Request::Update { .. } => "update note",
            Request::Delete(_) => "delete note",
        }
    }
}

/// What a completed gateway call returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Listed(NoteVector),
    Inserted(NoteVector),
    Updated(Note),
    Deleted(NoteId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub notes: NoteVector,
    pub editing: Option<Note>,
    pub title: String,
    pub content: String,
    pub view: View,
    pub query: String,
    pub loading: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            notes: NoteVector::new(),
            editing: None,
            title: String::new(),
            content: String::new(),
            view: View::All,
            query: String::new(),
            // The initial fetch is in flight from the first render.
            loading: true,
        }
    }
}

impl State {
    pub fn mode(&self) -> Mode {
        match &self.editing {
            Some(note) => Mode::Editing(note.id.clone()),
            None => Mode::Creating,
        }
    }

    pub fn refresh(&mut self) -> Request {
        self.loading = true;
        Request::List
    }

    pub fn set_view(&mut self, view: View) {
        log::debug!("view changed to {}", view);
        self.view = view;
    }

    /// A non-empty query switches to the search view, clearing it returns to all notes.
    pub fn set_query(&mut self, query: String) {
        self.view = if query.is_empty() { View::All } else { View::Search };
        self.query = query;
    }

    /// Loads a note into the form. Ignored while a call is in flight, since
    /// its completion resets the form.
    pub fn start_editing(&mut self, id: &str) {
        if self.loading {
            return;
        }
        if let Some(note) = self.notes.iter().find(|note| note.id == id) {
            self.title = note.title.clone();
            self.content = note.content.clone();
            self.editing = Some(note.clone());
        }
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
        self.clear_form();
    }

    /// Insert or update depending on [`Mode`]. `None` while another call is
    /// in flight or when the title is blank.
    pub fn submit(&mut self) -> Option<Request> {
        if self.loading || self.title.trim().is_empty() {
            return None;
        }

        let request = match self.mode() {
            Mode::Creating => Request::Insert(vec![NewNote {
                title: self.title.clone(),
                content: self.content.clone(),
            }]),
            Mode::Editing(id) => Request::Update {
                id,
                patch: NotePatch {
                    title: Some(self.title.clone()),
                    content: Some(self.content.clone()),
                },
            },
        };
        self.loading = true;
        Some(request)
    }

    pub fn request_delete(&mut self, id: &str) -> Option<Request> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(Request::Delete(id.to_string()))
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Listed(notes) => self.loaded(notes),
            Outcome::Inserted(rows) => self.created(rows),
            Outcome::Updated(row) => self.updated(row),
            Outcome::Deleted(id) => self.deleted(&id),
        }
    }

    pub fn loaded(&mut self, notes: NoteVector) {
        self.notes = notes;
        self.loading = false;
    }

    pub fn created(&mut self, rows: NoteVector) {
        let mut fresh = NoteVector::with_capacity(rows.len());
        for row in rows {
            if !self.notes.iter().chain(&fresh).any(|note| note.id == row.id) {
                fresh.push(row);
            }
        }
        self.notes.splice(0..0, fresh);
        self.clear_form();
        self.loading = false;
    }

    pub fn updated(&mut self, row: Note) {
        if let Some(note) = self.notes.iter_mut().find(|note| note.id == row.id) {
            *note = row;
        }
        self.cancel_editing();
        self.loading = false;
    }

    pub fn deleted(&mut self, id: &str) {
        self.notes.retain(|note| note.id != id);
        if matches!(&self.editing, Some(note) if note.id == id) {
            self.cancel_editing();
        }
        self.loading = false;
    }

    /// Drops the failed call. Everything but the loading flag stays as it was.
    pub fn failed(&mut self, operation: &str, err: &anyhow::Error) {
        log::error!("{} failed: {:#}", operation, err);
        self.loading = false;
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Note> {
        filter::visible(&self.notes, self.view, &self.query, now)
    }

    pub fn form_visible(&self) -> bool {
        matches!(self.view, View::All | View::New) || self.editing.is_some()
    }

    pub fn grid_visible(&self) -> bool {
        self.view != View::New
    }

    pub fn search_visible(&self) -> bool {
        self.editing.is_none()
    }

    pub fn heading(&self) -> &'static str {
        match self.view {
            View::All => "All Notes",
            View::Recent => "Recent Notes",
            View::Search => "Search Results",
            View::New => "Create New Note",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.view {
            View::All => "Organize your thoughts and ideas",
            View::Recent => "Your most recently created notes",
            View::Search => "Found notes matching your search",
            View::New => "Create a new note to capture your thoughts",
        }
    }

    fn clear_form(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn note(id: &str, title: &str, content: &str, created_at: DateTime<Utc>) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at: created_at,
        }
    }

    fn ready(notes: NoteVector) -> State {
        let mut state = State::default();
        state.loaded(notes);
        state
    }

    #[test]
    fn starts_loading_in_create_mode() {
        let state = State::default();
        assert!(state.loading);
        assert_eq!(state.mode(), Mode::Creating);
        assert_eq!(state.view, View::All);
    }

    #[test]
    fn submit_in_create_mode_inserts() {
        let mut state = ready(vec![]);
        state.title = "Title".into();
        state.content = "<p>body</p>".into();

        let request = state.submit();
        assert_eq!(
            request,
            Some(Request::Insert(vec![NewNote { title: "Title".into(), content: "<p>body</p>".into() }]))
        );
        assert!(state.loading);
        // A second submit while the first is in flight is ignored.
        assert_eq!(state.submit(), None);
    }

    #[test]
    fn blank_title_does_not_submit() {
        let mut state = ready(vec![]);
        state.title = "   ".into();
        assert_eq!(state.submit(), None);
        assert!(!state.loading);
    }

    #[test]
    fn created_rows_are_prepended_once_and_form_cleared() {
        let now = Utc::now();
        let old = note("old", "Old", "", now - Duration::hours(2));
        let mut state = ready(vec![old.clone()]);
        state.title = "New".into();
        state.content = "text".into();
        state.submit();

        let row = note("new", "New", "text", now);
        state.created(vec![row.clone(), row.clone()]);
        state.created(vec![row.clone()]);

        assert_eq!(state.notes, vec![row, old]);
        assert!(state.title.is_empty());
        assert!(state.content.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn submit_in_edit_mode_updates_by_id() {
        let now = Utc::now();
        let mut state = ready(vec![note("a", "A", "x", now)]);
        state.start_editing("a");
        assert_eq!(state.mode(), Mode::Editing("a".into()));
        assert_eq!(state.title, "A");
        assert_eq!(state.content, "x");

        state.title = "A2".into();
        let request = state.submit();
        assert_eq!(
            request,
            Some(Request::Update {
                id: "a".into(),
                patch: NotePatch { title: Some("A2".into()), content: Some("x".into()) },
            })
        );
    }

    #[test]
    fn update_touches_only_the_edited_note() {
        let now = Utc::now();
        let a = note("a", "A", "x", now - Duration::hours(1));
        let b = note("b", "B", "y", now - Duration::hours(3));
        let mut state = ready(vec![a.clone(), b.clone()]);
        state.start_editing("a");
        state.title = "A2".into();
        state.submit();

        let row = Note { title: "A2".into(), updated_at: now, ..a.clone() };
        state.updated(row.clone());

        assert_eq!(state.notes, vec![row.clone(), b]);
        assert_eq!(state.notes[0].created_at, a.created_at);
        assert_eq!(state.mode(), Mode::Creating);
        assert!(state.title.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn cancel_clears_form_and_mode() {
        let now = Utc::now();
        let mut state = ready(vec![note("a", "A", "x", now)]);
        state.start_editing("a");
        state.cancel_editing();

        assert_eq!(state.mode(), Mode::Creating);
        assert!(state.title.is_empty());
        assert!(state.content.is_empty());
    }

    #[test]
    fn editing_unknown_note_is_ignored() {
        let mut state = ready(vec![]);
        state.start_editing("missing");
        assert_eq!(state.mode(), Mode::Creating);
    }

    #[test]
    fn edit_requested_during_insert_is_ignored() {
        let now = Utc::now();
        let mut state = ready(vec![note("a", "A", "x", now)]);
        state.title = "New".into();
        state.submit();

        state.start_editing("a");
        assert_eq!(state.mode(), Mode::Creating);
        assert_eq!(state.title, "New");

        state.created(vec![note("new", "New", "", now)]);
        assert_eq!(state.mode(), Mode::Creating);
        assert!(state.title.is_empty());
        assert!(state.content.is_empty());

        state.start_editing("a");
        assert_eq!(state.mode(), Mode::Editing("a".into()));
        assert_eq!(state.title, "A");
    }

    #[test]
    fn delete_removes_exactly_that_note() {
        let now = Utc::now();
        let a = note("a", "A", "", now);
        let b = note("b", "B", "", now);
        let mut state = ready(vec![a.clone(), b.clone()]);

        assert_eq!(state.request_delete("b"), Some(Request::Delete("b".into())));
        state.apply(Outcome::Deleted("b".into()));
        assert_eq!(state.notes, vec![a]);
        assert!(!state.loading);
    }

    #[test]
    fn deleting_the_edited_note_leaves_edit_mode() {
        let now = Utc::now();
        let mut state = ready(vec![note("a", "A", "x", now)]);
        state.start_editing("a");
        state.request_delete("a");
        state.deleted("a");

        assert_eq!(state.mode(), Mode::Creating);
        assert!(state.title.is_empty());
    }

    #[test]
    fn failure_keeps_prior_state() {
        let now = Utc::now();
        let mut state = ready(vec![note("a", "A", "x", now)]);
        state.title = "draft".into();
        let request = state.submit().unwrap();

        let before = State { loading: false, ..state.clone() };
        state.failed(request.operation(), &anyhow::anyhow!("connection refused"));
        assert_eq!(state, before);
    }

    #[test]
    fn query_drives_the_view() {
        let now = Utc::now();
        let mut state = ready(vec![
            note("a", "A", "x", now - Duration::hours(1)),
            note("b", "B", "y", now - Duration::hours(30)),
        ]);

        state.set_query("Y".into());
        assert_eq!(state.view, View::Search);
        let ids: Vec<_> = state.visible(now).into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["b"]);

        state.set_query(String::new());
        assert_eq!(state.view, View::All);
        assert_eq!(state.visible(now).len(), 2);

        state.set_view(View::Recent);
        let ids: Vec<_> = state.visible(now).into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a"]);
    }

    #[test]
    fn layout_follows_view_and_mode() {
        let now = Utc::now();
        let mut state = ready(vec![note("a", "A", "x", now)]);
        assert!(state.form_visible() && state.grid_visible() && state.search_visible());

        state.set_view(View::Recent);
        assert!(!state.form_visible());
        assert_eq!(state.heading(), "Recent Notes");

        state.start_editing("a");
        assert!(state.form_visible());
        assert!(!state.search_visible());

        state.set_view(View::New);
        assert!(!state.grid_visible());
        assert_eq!(state.heading(), "Create New Note");
    }
}

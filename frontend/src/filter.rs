//! View modes and the pure filtering that derives the visible note list.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::structs::Note;

/// How far back the "recent" view reaches.
pub const RECENT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    All,
    Recent,
    Search,
    New,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::All => "all",
            View::Recent => "recent",
            View::Search => "search",
            View::New => "new",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(View::All),
            "recent" => Ok(View::Recent),
            "search" => Ok(View::Search),
            "new" => Ok(View::New),
            other => Err(anyhow::anyhow!("unknown view `{}`", other)),
        }
    }
}

/// Created no more than [`RECENT_WINDOW_HOURS`] before `now`.
pub fn is_recent(note: &Note, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(note.created_at) <= Duration::hours(RECENT_WINDOW_HOURS)
}

pub fn matches_query(note: &Note, query: &str) -> bool {
    let query = query.to_lowercase();
    note.title.to_lowercase().contains(&query) || note.content.to_lowercase().contains(&query)
}

/// The subset of `notes` shown for `view`, in their original order.
pub fn visible<'a>(notes: &'a [Note], view: View, query: &str, now: DateTime<Utc>) -> Vec<&'a Note> {
    match view {
        View::Recent => notes.iter().filter(|note| is_recent(note, now)).collect(),
        View::Search => notes.iter().filter(|note| matches_query(note, query)).collect(),
        View::All | View::New => notes.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, content: &str, created_at: DateTime<Utc>) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at: created_at,
        }
    }

    fn sample(now: DateTime<Utc>) -> Vec<Note> {
        vec![
            note("a", "A", "x", now - Duration::hours(1)),
            note("b", "B", "y", now - Duration::hours(30)),
        ]
    }

    fn ids(notes: Vec<&Note>) -> Vec<&str> {
        notes.into_iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn recent_view_keeps_last_day() {
        let now = Utc::now();
        let notes = sample(now);
        assert_eq!(ids(visible(&notes, View::Recent, "", now)), ["a"]);
    }

    #[test]
    fn search_view_matches_content() {
        let now = Utc::now();
        let notes = sample(now);
        assert_eq!(ids(visible(&notes, View::Search, "y", now)), ["b"]);
    }

    #[test]
    fn all_and_new_views_are_unfiltered() {
        let now = Utc::now();
        let notes = sample(now);
        assert_eq!(ids(visible(&notes, View::All, "y", now)), ["a", "b"]);
        assert_eq!(ids(visible(&notes, View::New, "", now)), ["a", "b"]);
    }

    #[test]
    fn recent_window_boundary_is_inclusive() {
        let now = Utc::now();
        let edge = note("edge", "", "", now - Duration::hours(RECENT_WINDOW_HOURS));
        let past = note("past", "", "", now - Duration::hours(RECENT_WINDOW_HOURS) - Duration::seconds(1));
        let future = note("future", "", "", now + Duration::minutes(5));

        assert!(is_recent(&edge, now));
        assert!(!is_recent(&past, now));
        assert!(is_recent(&future, now));
    }

    #[test]
    fn search_ignores_case_in_title_and_content() {
        let now = Utc::now();
        let n = note("n", "Meeting Notes", "<p>Call <b>Bob</b></p>", now);

        assert!(matches_query(&n, "meeting"));
        assert!(matches_query(&n, "BOB"));
        assert!(matches_query(&n, ""));
        assert!(!matches_query(&n, "alice"));
    }

    #[test]
    fn view_names_round_trip() {
        for view in [View::All, View::Recent, View::Search, View::New] {
            assert_eq!(view.to_string().parse::<View>().unwrap(), view);
        }
        assert!("archive".parse::<View>().is_err());
    }
}

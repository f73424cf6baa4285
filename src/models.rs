use serde::{Deserialize, Serialize};

/// A track fetched from the source platform. Immutable after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub primary_artist: String,
    pub source_id: String,
}

/// One slot of a source playlist. `track` is `None` when the entry has no
/// underlying media reference (removed or local tracks); such slots are
/// preserved so the transfer can record them instead of silently dropping
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

/// A playlist on either platform. Source and destination identifiers live in
/// distinct namespaces and are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    pub title: String,
    pub item_count: u32,
}

/// The destination item a track resolved to via search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub destination_id: String,
    pub matched_query: String,
}

#[cfg(test)]
impl Track {
    pub fn mock(title: &str, artist: &str) -> Self {
        Self {
            title: title.to_string(),
            primary_artist: artist.to_string(),
            source_id: "mock_id".to_string(),
        }
    }
}

#[cfg(test)]
impl PlaylistItem {
    pub fn mock(title: &str, artist: &str) -> Self {
        Self {
            track: Some(Track::mock(title, artist)),
        }
    }

    pub fn empty() -> Self {
        Self { track: None }
    }
}

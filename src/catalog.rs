//! Seams between the transfer orchestrator and the two platforms.
//!
//! The orchestrator only ever talks to these traits, so its partial-failure
//! policy can be exercised against in-memory fakes in tests.

use crate::error::{Platform, Result};
use crate::models::{PlaylistItem, PlaylistRef, ResolvedItem};

/// The platform a playlist is copied from.
#[allow(async_fn_in_trait)]
pub trait SourceCatalog {
    fn platform(&self) -> Platform;

    fn is_authenticated(&self) -> bool;

    async fn list_playlists(&self) -> Result<Vec<PlaylistRef>>;

    /// Returns every item of the playlist, in playlist order. Upstream
    /// pagination is handled internally; the caller never sees a partial
    /// page.
    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>>;
}

/// The platform a playlist is copied to.
#[allow(async_fn_in_trait)]
pub trait DestinationCatalog {
    fn platform(&self) -> Platform;

    fn is_authenticated(&self) -> bool;

    /// Creates a new playlist. Visibility is a fixed policy of the
    /// implementation (private), not a parameter.
    async fn create_playlist(&self, title: &str, description: &str) -> Result<PlaylistRef>;

    /// Resolves a free-text query to the single top-ranked result of the
    /// platform's native relevance ranking. `Ok(None)` when the search
    /// yields nothing. No client-side re-ranking.
    async fn search_best_match(&self, query: &str) -> Result<Option<ResolvedItem>>;

    async fn append_item(&self, playlist_id: &str, destination_id: &str) -> Result<()>;
}

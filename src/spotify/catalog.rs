use rspotify::{
    model::{PlayableItem, PlaylistId},
    prelude::*,
};
use tracing::info;

use crate::catalog::SourceCatalog;
use crate::error::{AppError, Platform, Result};
use crate::models::{PlaylistItem, PlaylistRef, Track};
use crate::spotify::session::SpotifySession;

/// Read-only view of the authenticated user's Spotify library, backed by an
/// explicit session value.
pub struct SpotifyCatalog<'a> {
    session: &'a SpotifySession,
}

impl<'a> SpotifyCatalog<'a> {
    pub fn new(session: &'a SpotifySession) -> Self {
        Self { session }
    }
}

impl SourceCatalog for SpotifyCatalog<'_> {
    fn platform(&self) -> Platform {
        Platform::Spotify
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    async fn list_playlists(&self) -> Result<Vec<PlaylistRef>> {
        let client = self.session.client()?;

        let mut playlists = Vec::new();
        let mut offset = 0;
        let limit = 50;

        loop {
            let page = client
                .current_user_playlists_manual(Some(limit), Some(offset))
                .await
                .map_err(|e| AppError::upstream(Platform::Spotify, e))?;

            for playlist in page.items {
                playlists.push(PlaylistRef {
                    id: playlist.id.id().to_string(),
                    title: playlist.name,
                    item_count: playlist.tracks.total,
                });
            }

            if page.next.is_none() {
                break;
            }
            offset += limit;
        }

        info!("Found {} Spotify playlists", playlists.len());
        Ok(playlists)
    }

    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        let client = self.session.client()?;
        let id = PlaylistId::from_id(playlist_id)
            .map_err(|e| AppError::Config(format!("Invalid playlist ID: {e}")))?;

        let mut items = Vec::new();
        let mut offset = 0;
        let limit = 100;

        loop {
            let page = client
                .playlist_items_manual(id.clone_static(), None, None, Some(limit), Some(offset))
                .await
                .map_err(|e| AppError::upstream(Platform::Spotify, e))?;

            for item in page.items {
                items.push(PlaylistItem {
                    track: playable_track(item.track),
                });
            }

            if page.next.is_none() {
                break;
            }
            offset += limit;
        }

        info!("Fetched {} items from playlist {}", items.len(), playlist_id);
        Ok(items)
    }
}

/// Removed entries, podcast episodes and local tracks carry no usable media
/// reference and map to `None`.
fn playable_track(playable: Option<PlayableItem>) -> Option<Track> {
    match playable {
        Some(PlayableItem::Track(track)) => {
            let id = track.id?;
            Some(Track {
                title: track.name,
                primary_artist: track
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                source_id: id.id().to_string(),
            })
        }
        _ => None,
    }
}

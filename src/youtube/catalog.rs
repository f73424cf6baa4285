use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::DestinationCatalog;
use crate::error::{AppError, Platform, Result};
use crate::models::{PlaylistRef, ResolvedItem};
use crate::youtube::session::YouTubeSession;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreatePlaylistRequest {
    snippet: PlaylistSnippet,
    status: PlaylistStatus,
}

#[derive(Debug, Serialize)]
struct PlaylistSnippet {
    title: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct PlaylistStatus {
    #[serde(rename = "privacyStatus")]
    privacy_status: String,
}

#[derive(Debug, Deserialize)]
struct CreatedPlaylist {
    id: String,
    snippet: CreatedPlaylistSnippet,
}

#[derive(Debug, Deserialize)]
struct CreatedPlaylistSnippet {
    title: String,
}

/// Write-side view of the authenticated user's YouTube account, backed by an
/// explicit session value.
pub struct YouTubeCatalog<'a> {
    session: &'a YouTubeSession,
}

impl<'a> YouTubeCatalog<'a> {
    pub fn new(session: &'a YouTubeSession) -> Self {
        Self { session }
    }
}

impl DestinationCatalog for YouTubeCatalog<'_> {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    async fn create_playlist(&self, title: &str, description: &str) -> Result<PlaylistRef> {
        let token = self.session.access_token()?;

        let request = CreatePlaylistRequest {
            snippet: PlaylistSnippet {
                title: title.to_string(),
                description: description.to_string(),
            },
            // New playlists are always private.
            status: PlaylistStatus {
                privacy_status: "private".to_string(),
            },
        };

        let response = self
            .session
            .http_client()
            .post(format!("{YOUTUBE_API_BASE}/playlists"))
            .bearer_auth(token)
            .query(&[("part", "snippet,status")])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::upstream(Platform::YouTube, e))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                Platform::YouTube,
                format!("Failed to create playlist: {error_text}"),
            ));
        }

        let created: CreatedPlaylist = response
            .json()
            .await
            .map_err(|e| AppError::upstream(Platform::YouTube, e))?;

        info!("Created YouTube playlist: {}", created.snippet.title);

        Ok(PlaylistRef {
            id: created.id,
            title: created.snippet.title,
            item_count: 0,
        })
    }

    async fn search_best_match(&self, query: &str) -> Result<Option<ResolvedItem>> {
        let token = self.session.access_token()?;

        let response = self
            .session
            .http_client()
            .get(format!("{YOUTUBE_API_BASE}/search"))
            .bearer_auth(token)
            .query(&[
                ("part", "id"),
                ("q", query),
                ("type", "video"),
                ("maxResults", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::upstream(Platform::YouTube, e))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                Platform::YouTube,
                format!("Search failed: {error_text}"),
            ));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(Platform::YouTube, e))?;

        // Top result of the platform's own ranking, nothing more.
        let video_id = search
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id);

        match video_id {
            Some(destination_id) => Ok(Some(ResolvedItem {
                destination_id,
                matched_query: query.to_string(),
            })),
            None => {
                debug!("No search result for query: {}", query);
                Ok(None)
            }
        }
    }

    async fn append_item(&self, playlist_id: &str, destination_id: &str) -> Result<()> {
        let token = self.session.access_token()?;

        let body = serde_json::json!({
            "snippet": {
                "playlistId": playlist_id,
                "resourceId": {
                    "kind": "youtube#video",
                    "videoId": destination_id,
                },
            },
        });

        let response = self
            .session
            .http_client()
            .post(format!("{YOUTUBE_API_BASE}/playlistItems"))
            .bearer_auth(token)
            .query(&[("part", "snippet")])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(Platform::YouTube, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(destination_id.to_string()));
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                Platform::YouTube,
                format!("Failed to add video to playlist: {error_text}"),
            ));
        }

        debug!("Added video {} to playlist {}", destination_id, playlist_id);
        Ok(())
    }
}

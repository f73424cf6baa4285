//! Facade consumed by outer layers (CLI here, an HTTP layer elsewhere).
//!
//! Sessions are plain values owned by the service and handed to short-lived
//! catalogs per call; nothing platform-specific is mutated behind the
//! caller's back.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::models::PlaylistRef;
use crate::spotify::{SpotifyCatalog, SpotifyGateway, SpotifySession};
use crate::transfer::{TransferOrchestrator, TransferReport};
use crate::youtube::{YouTubeCatalog, YouTubeGateway, YouTubeSession};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuthStatus {
    pub source: bool,
    pub destination: bool,
}

/// Owns one gateway and one session per platform.
///
/// `transfer` takes `&mut self`: one pair of sessions drives at most one
/// in-flight transfer, enforced by the exclusive borrow.
pub struct TransferService {
    spotify_gateway: SpotifyGateway,
    youtube_gateway: YouTubeGateway,
    spotify_session: SpotifySession,
    youtube_session: YouTubeSession,
}

impl TransferService {
    pub fn new(config: &Config) -> Self {
        Self {
            spotify_gateway: SpotifyGateway::new(config),
            youtube_gateway: YouTubeGateway::new(config),
            spotify_session: SpotifySession::unauthenticated(),
            youtube_session: YouTubeSession::unauthenticated(),
        }
    }

    pub fn auth_status(&self) -> AuthStatus {
        AuthStatus {
            source: self.spotify_session.is_authenticated(),
            destination: self.youtube_session.is_authenticated(),
        }
    }

    pub fn source_auth_url(&self) -> Result<String> {
        self.spotify_gateway.auth_url()
    }

    pub fn destination_auth_url(&self) -> Result<String> {
        self.youtube_gateway.auth_url()
    }

    pub async fn complete_source_auth(&mut self, code: &str) -> Result<()> {
        self.spotify_session = self.spotify_gateway.complete_auth(code).await?;
        Ok(())
    }

    pub async fn complete_destination_auth(&mut self, code: &str) -> Result<()> {
        self.youtube_session = self.youtube_gateway.complete_auth(code).await?;
        Ok(())
    }

    pub async fn list_source_playlists(&self) -> Result<Vec<PlaylistRef>> {
        use crate::catalog::SourceCatalog as _;
        SpotifyCatalog::new(&self.spotify_session)
            .list_playlists()
            .await
    }

    pub async fn transfer(
        &mut self,
        source_playlist_id: &str,
        cancel: &CancellationToken,
    ) -> Result<TransferReport> {
        let orchestrator = TransferOrchestrator::new(
            SpotifyCatalog::new(&self.spotify_session),
            YouTubeCatalog::new(&self.youtube_session),
        );
        orchestrator.transfer(source_playlist_id, cancel).await
    }
}

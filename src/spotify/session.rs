use rspotify::{AuthCodeSpotify, Credentials, OAuth, prelude::*, scopes};
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Platform, Result};

// Fixed state token, mirrored by the redirect handler.
const AUTH_STATE: &str = "state";

/// Builds Spotify authorization URLs and exchanges authorization codes for
/// usable sessions. Each successful exchange yields a fresh session value,
/// so repeated authentications never share a token cell.
pub struct SpotifyGateway {
    creds: Credentials,
    oauth: OAuth,
}

impl SpotifyGateway {
    pub fn new(config: &Config) -> Self {
        let creds = Credentials::new(&config.spotify_client_id, &config.spotify_client_secret);

        let oauth = OAuth {
            redirect_uri: config.spotify_redirect_uri.clone(),
            state: AUTH_STATE.to_string(),
            scopes: scopes!("playlist-read-private", "playlist-read-collaborative"),
            ..Default::default()
        };

        Self { creds, oauth }
    }

    fn client(&self) -> AuthCodeSpotify {
        AuthCodeSpotify::new(self.creds.clone(), self.oauth.clone())
    }

    pub fn auth_url(&self) -> Result<String> {
        self.client()
            .get_authorize_url(false)
            .map_err(|e| AppError::Config(format!("Failed to build Spotify auth URL: {e}")))
    }

    pub async fn complete_auth(&self, code: &str) -> Result<SpotifySession> {
        let client = self.client();
        client
            .request_token(code)
            .await
            .map_err(|e| AppError::AuthExchange {
                platform: Platform::Spotify,
                reason: e.to_string(),
            })?;

        info!("Successfully authenticated with Spotify");

        Ok(SpotifySession {
            client: Some(client),
        })
    }
}

/// An explicit session value. Starts unauthenticated; `SpotifyGateway`
/// produces authenticated ones.
pub struct SpotifySession {
    client: Option<AuthCodeSpotify>,
}

impl SpotifySession {
    pub fn unauthenticated() -> Self {
        Self { client: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_some()
    }

    pub(crate) fn client(&self) -> Result<&AuthCodeSpotify> {
        self.client.as_ref().ok_or(AppError::AuthRequired {
            platform: Platform::Spotify,
        })
    }
}

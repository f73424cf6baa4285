use reqwest::Client;
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Platform, Result};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

const YOUTUBE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/youtube",
    "https://www.googleapis.com/auth/youtube.force-ssl",
];

// Fixed state token, mirrored by the redirect handler.
const AUTH_STATE: &str = "state";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Builds Google authorization URLs and exchanges authorization codes for
/// usable sessions via the OAuth token endpoint.
pub struct YouTubeGateway {
    http_client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl YouTubeGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: Client::new(),
            client_id: config.youtube_client_id.clone(),
            client_secret: config.youtube_client_secret.clone(),
            redirect_uri: config.youtube_redirect_uri.clone(),
        }
    }

    pub fn auth_url(&self) -> Result<String> {
        let url = Url::parse_with_params(
            GOOGLE_AUTH_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", &YOUTUBE_SCOPES.join(" ")),
                ("access_type", "offline"),
                ("state", AUTH_STATE),
            ],
        )
        .map_err(|e| AppError::Config(format!("Failed to build YouTube auth URL: {e}")))?;

        Ok(url.into())
    }

    pub async fn complete_auth(&self, code: &str) -> Result<YouTubeSession> {
        let response = self
            .http_client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::AuthExchange {
                platform: Platform::YouTube,
                reason: error_text,
            });
        }

        let token: TokenResponse =
            response.json().await.map_err(|e| AppError::AuthExchange {
                platform: Platform::YouTube,
                reason: format!("Failed to parse token response: {e}"),
            })?;

        info!("Successfully authenticated with YouTube");

        Ok(YouTubeSession {
            http_client: self.http_client.clone(),
            access_token: Some(token.access_token),
        })
    }
}

/// An explicit session value. Starts unauthenticated; `YouTubeGateway`
/// produces authenticated ones.
pub struct YouTubeSession {
    http_client: Client,
    access_token: Option<String>,
}

impl YouTubeSession {
    pub fn unauthenticated() -> Self {
        Self {
            http_client: Client::new(),
            access_token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub(crate) fn access_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or(AppError::AuthRequired {
                platform: Platform::YouTube,
            })
    }
}

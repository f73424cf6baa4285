pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod spotify;
pub mod transfer;
pub mod youtube;

pub use catalog::{DestinationCatalog, SourceCatalog};
pub use config::Config;
pub use error::{AppError, Platform, Result};
pub use models::{PlaylistItem, PlaylistRef, ResolvedItem, Track};
pub use service::{AuthStatus, TransferService};
pub use spotify::{SpotifyCatalog, SpotifyGateway, SpotifySession};
pub use transfer::{TransferOrchestrator, TransferOutcome, TransferReport};
pub use youtube::{YouTubeCatalog, YouTubeGateway, YouTubeSession};

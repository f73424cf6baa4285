pub mod catalog;
pub mod session;

pub use catalog::YouTubeCatalog;
pub use session::{YouTubeGateway, YouTubeSession};

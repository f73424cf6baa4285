pub mod catalog;
pub mod session;

pub use catalog::SpotifyCatalog;
pub use session::{SpotifyGateway, SpotifySession};

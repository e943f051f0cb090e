//! Spotify album search and markdown note generation.
//!
//! The flow is driven by [`album_search::AlbumSearch`]: a cached client-credentials
//! token feeds the catalog search, the chosen album is rendered through a
//! placeholder template and written into a vault without ever overwriting.

pub mod album_search;
pub mod config;
pub mod error;
pub mod notify;
pub mod render;
pub mod search;
pub mod token;
pub mod types;
pub mod vault;
pub mod writer;

pub use album_search::AlbumSearch;
pub use config::{Credentials, Settings};
pub use error::{ApiError, ConfigError, VaultError};
pub use notify::Notifier;
pub use search::{CatalogClient, Endpoints};
pub use token::{Clock, SystemClock, Token, TokenManager};
pub use types::Album;
pub use vault::{FsVault, Vault};
pub use writer::WriteOutcome;

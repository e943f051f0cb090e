use std::sync::Arc;

use chrono::Local;

use crate::{
    config::Settings,
    error::{ConfigError, VaultError},
    notify::Notifier,
    render,
    search::{CatalogClient, Endpoints},
    token::{Clock, SystemClock},
    types::Album,
    vault::Vault,
    writer::{self, WriteOutcome},
};

/// The "Search album" command: query suggestions, then turn the chosen album
/// into a note.
pub struct AlbumSearch<V, N> {
    settings: Settings,
    catalog: CatalogClient,
    clock: Arc<dyn Clock>,
    vault: V,
    notifier: N,
}

impl<V: Vault, N: Notifier> AlbumSearch<V, N> {
    pub fn open(
        settings: Settings,
        endpoints: &Endpoints,
        vault: V,
        notifier: N,
    ) -> Result<AlbumSearch<V, N>, ConfigError> {
        Self::open_with_clock(settings, endpoints, vault, notifier, Arc::new(SystemClock))
    }

    /// Fails without touching the network when either credential is blank.
    pub fn open_with_clock(
        settings: Settings,
        endpoints: &Endpoints,
        vault: V,
        notifier: N,
        clock: Arc<dyn Clock>,
    ) -> Result<AlbumSearch<V, N>, ConfigError> {
        let creds = match settings.credentials() {
            Ok(creds) => creds,
            Err(err) => {
                notifier.notice("Please set your Spotify client ID and secret in settings.");
                return Err(err);
            }
        };

        Ok(AlbumSearch {
            catalog: CatalogClient::new(endpoints, creds, clock.clone()),
            settings,
            clock,
            vault,
            notifier,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn suggestions(&mut self, query: &str) -> Vec<Album> {
        self.catalog.search(query, &self.notifier).await
    }

    pub fn choose(&self, album: &Album) -> Result<WriteOutcome, VaultError> {
        self.notifier.notice(&format!("Selected: {}", album.name));
        self.create_album_note(album).map_err(|err| {
            tracing::error!(error = %err, album = %album.id, "failed to create album note");
            self.notifier.notice("Failed to create album note");
            err
        })
    }

    fn create_album_note(&self, album: &Album) -> Result<WriteOutcome, VaultError> {
        let body = render::body_pattern(&self.vault, &self.settings.template_file, &self.notifier);
        let today = self.clock.now().with_timezone(&Local).date_naive();
        let note = render::render(album, self.settings.file_name_format(), &body, today);

        writer::write_note(
            &self.vault,
            &self.notifier,
            &self.settings.folder,
            &note.file_name,
            &note.content,
        )
    }
}

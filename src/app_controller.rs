use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::app_config::Config;
use crate::database::{KeyValueStore, MemoryStore, SqliteStore};
use crate::history::EntryStore;
use crate::providers::{GoogleTranslator, HttpSummaryBackend, SummaryBackend, Translator};
use crate::session::RequestController;
use crate::theme::ThemeStore;
use crate::translation::TranslationOverlay;

// @module: Application wiring from configuration to session components

/// Fully wired client: storage, collaborators, controller and overlay
#[derive(Debug)]
pub struct Application {
    // @field: App configuration
    config: Config,
    backend: Arc<HttpSummaryBackend>,
    store: Arc<EntryStore>,
    controller: Arc<RequestController>,
    overlay: TranslationOverlay,
    theme: ThemeStore,
}

impl Application {
    // @method: Build the application with SQLite-backed persistence
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        let kv = match &config.history.database_path {
            Some(path) => SqliteStore::open(path)?,
            None => SqliteStore::open_default()?,
        };
        info!("History database: {}", kv.path().display());

        Self::with_store(config, Arc::new(kv))
    }

    /// Build the application with process-local persistence
    pub fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        debug!("Using ephemeral in-memory storage");
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    // @method: Wire HTTP collaborators over the given store
    pub fn with_store(config: Config, kv: Arc<dyn KeyValueStore>) -> Result<Self> {
        let backend = Arc::new(
            HttpSummaryBackend::new(config.backend_url()?)
                .context("Failed to create summarization client")?,
        );
        let translator: Arc<dyn Translator> = Arc::new(
            GoogleTranslator::new(&config.translation.endpoint, &config.translation.client)
                .context("Failed to create translation client")?,
        );

        let store = Arc::new(EntryStore::new(kv.clone()));
        let controller = Arc::new(RequestController::new(
            backend.clone() as Arc<dyn SummaryBackend>,
            store.clone(),
            config.backend.timeout(),
        ));
        let overlay = TranslationOverlay::new(
            translator,
            store.clone(),
            controller.clone(),
            config.translation.timeout(),
        );

        Ok(Self {
            theme: ThemeStore::new(kv),
            config,
            backend,
            store,
            controller,
            overlay,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Summarization client, also used for downloads
    pub fn backend(&self) -> &HttpSummaryBackend {
        &self.backend
    }

    pub fn history(&self) -> &EntryStore {
        &self.store
    }

    pub fn controller(&self) -> &RequestController {
        &self.controller
    }

    pub fn overlay(&self) -> &TranslationOverlay {
        &self.overlay
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }
}

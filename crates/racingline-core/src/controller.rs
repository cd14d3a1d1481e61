//! The refresh service tying fetcher, decoder, deriver, and store together.
//!
//! A refresh either publishes a complete new generation or leaves the store
//! exactly as it was. Overlapping refreshes are not coordinated: whichever
//! finishes last is what readers see.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::{self, ApiClient, FetchError, Fetcher, RefreshError};
use crate::auth::KeyProvider;
use crate::cache::{CacheState, StateStore};
use crate::config::Config;
use crate::models::{Circuit, Series};
use crate::views::DerivedViews;

/// Schedule data service.
/// Clone is cheap - every collaborator is behind an Arc.
#[derive(Clone)]
pub struct DataController {
    data_url: Arc<String>,
    keys: Arc<dyn KeyProvider>,
    fetcher: Arc<dyn Fetcher>,
    store: Arc<StateStore>,
}

impl DataController {
    /// Controller backed by a reqwest client configured from `config`
    pub fn new(config: &Config, keys: Arc<dyn KeyProvider>) -> anyhow::Result<Self> {
        let data_url = config.resolve_data_url()?;
        api::parse_url(&data_url)?;
        let client = match config.request_timeout() {
            Some(timeout) => ApiClient::with_timeout(timeout)?,
            None => ApiClient::new()?,
        };
        Ok(Self::with_fetcher(data_url, keys, Arc::new(client)))
    }

    pub fn with_fetcher(
        data_url: impl Into<String>,
        keys: Arc<dyn KeyProvider>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            data_url: Arc::new(data_url.into()),
            keys,
            fetcher,
            store: Arc::new(StateStore::new()),
        }
    }

    /// Fetch, decode, derive against the current time, and publish.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        info!(url = %self.data_url, "Downloading schedule data");

        let bytes = self.download().await?;
        self.apply(&bytes, Utc::now())
    }

    /// Decode `bytes` and publish the views derived at `now`.
    pub fn apply(&self, bytes: &[u8], now: DateTime<Utc>) -> Result<(), RefreshError> {
        let snapshot = api::decode(bytes).map_err(|e| {
            error!(path = %e.path, error = %e.message, "Failed to decode schedule data");
            e
        })?;
        let views = DerivedViews::derive(&snapshot, now);
        self.store.replace(snapshot, views);
        Ok(())
    }

    async fn download(&self) -> Result<Vec<u8>, RefreshError> {
        let key = self.keys.access_key().map_err(|e| {
            error!(error = %e, "No access key available");
            RefreshError::KeyUnavailable(e.to_string())
        })?;
        let headers = api::data_headers(&key).map_err(|e| {
            error!(error = %e, "Access key is not a valid header value");
            RefreshError::from(e)
        })?;

        self.fetcher
            .fetch(&self.data_url, &headers)
            .await
            .map_err(|e: FetchError| {
                error!(url = %self.data_url, error = %e, "API call failed");
                RefreshError::from(e)
            })
    }

    /// Run `refresh` on the tokio runtime; failures are logged, not returned.
    pub fn refresh_background(&self) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            // Each failure path has already logged at error
            if let Err(e) = controller.refresh().await {
                debug!(error = %e, "Background refresh abandoned");
            }
        })
    }

    // ===== Read surface for the presentation layer =====

    pub fn state(&self) -> Arc<CacheState> {
        self.store.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<CacheState>> {
        self.store.subscribe()
    }

    pub fn series_by_id(&self, id: &str) -> Option<Series> {
        self.store.get().series_by_id(id).cloned()
    }

    pub fn circuit_by_name(&self, name: &str) -> Option<Circuit> {
        self.store.get().circuit_by_name(name).cloned()
    }

    pub fn timeline_height(&self) -> usize {
        self.store.get().timeline_height()
    }
}

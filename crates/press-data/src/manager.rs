//! # Pricing Data Manager
//!
//! Holds the current table snapshot and gates pricing until one is loaded.
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PricingDataManager                                 │
//! │                                                                         │
//! │  current: RwLock<Option<Arc<PricingSnapshot>>>                         │
//! │  ready:   watch::Sender<bool>                                          │
//! │                                                                         │
//! │   None ──load()──► Some(snapshot A) ──reload()──► Some(snapshot B)     │
//! │    ▲                                                   │               │
//! │    └──────────────────────── clear() ◄─────────────────┘               │
//! │                                                                         │
//! │  engine()      PricingDataUnavailable while None                       │
//! │  wait_ready()  parks until the first snapshot is installed             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Engines handed out keep their own `Arc` of the tables, so a reload never
//! changes a calculation already in flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use press_core::{PricingEngine, PricingError, PricingResult, PricingTables};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{DataConfig, TableSource};
use crate::error::DataResult;
use crate::loader;

// =============================================================================
// Snapshot
// =============================================================================

/// One immutable set of loaded tables.
#[derive(Debug)]
pub struct PricingSnapshot {
    pub id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub source: TableSource,
    pub tables: Arc<PricingTables>,
}

impl PricingSnapshot {
    fn new(source: TableSource, tables: PricingTables) -> Self {
        PricingSnapshot {
            id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            source,
            tables: Arc::new(tables),
        }
    }

    /// An engine over this snapshot's tables.
    pub fn engine(&self) -> PricingEngine {
        PricingEngine::new(Arc::clone(&self.tables))
    }
}

// =============================================================================
// Manager
// =============================================================================

pub struct PricingDataManager {
    config: DataConfig,
    current: RwLock<Option<Arc<PricingSnapshot>>>,
    ready: watch::Sender<bool>,
}

impl PricingDataManager {
    /// Creates an empty manager. Nothing is read until [`Self::load`].
    pub fn new(config: DataConfig) -> Self {
        let (ready, _) = watch::channel(false);
        PricingDataManager {
            config,
            current: RwLock::new(None),
            ready,
        }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// True once a snapshot is installed and not cleared.
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// The current snapshot, if any.
    pub async fn snapshot(&self) -> Option<Arc<PricingSnapshot>> {
        self.current.read().await.clone()
    }

    /// An engine over the current tables.
    ///
    /// ## Errors
    /// `PricingDataUnavailable` before the first load or after [`Self::clear`].
    pub async fn engine(&self) -> PricingResult<PricingEngine> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.engine())
            .ok_or(PricingError::PricingDataUnavailable)
    }

    /// Waits for tables, then returns an engine over them.
    pub async fn wait_ready(&self) -> PricingResult<PricingEngine> {
        let mut rx = self.ready.subscribe();
        loop {
            if rx.wait_for(|ready| *ready).await.is_err() {
                return Err(PricingError::PricingDataUnavailable);
            }
            match self.engine().await {
                Ok(engine) => return Ok(engine),
                // cleared between the signal and the read
                Err(_) => tokio::task::yield_now().await,
            }
        }
    }

    /// Loads tables unless a snapshot is already present.
    pub async fn load(&self) -> DataResult<Arc<PricingSnapshot>> {
        if let Some(snapshot) = self.snapshot().await {
            debug!(id = %snapshot.id, "Pricing tables already loaded");
            return Ok(snapshot);
        }
        self.reload().await
    }

    /// Re-reads the configured source and swaps the snapshot.
    ///
    /// On error the previous snapshot stays in place.
    pub async fn reload(&self) -> DataResult<Arc<PricingSnapshot>> {
        let (source, tables) = loader::load_tables(&self.config)?;
        Ok(self.install(source, tables).await)
    }

    /// Like [`Self::reload`], falling back to the built-in tables.
    pub async fn reload_or_default(&self) -> Arc<PricingSnapshot> {
        let (source, tables) = loader::load_tables_or_default(&self.config);
        self.install(source, tables).await
    }

    /// Installs tables that were built or fetched elsewhere.
    pub async fn install(&self, source: TableSource, tables: PricingTables) -> Arc<PricingSnapshot> {
        let snapshot = Arc::new(PricingSnapshot::new(source, tables));
        let previous = self.current.write().await.replace(Arc::clone(&snapshot));
        self.ready.send_replace(true);

        info!(
            id = %snapshot.id,
            source = %snapshot.source,
            replaced = ?previous.map(|p| p.id),
            "Pricing tables installed"
        );
        snapshot
    }

    /// Drops the cached tables. Pricing is unavailable until the next load.
    pub async fn clear(&self) {
        self.ready.send_replace(false);
        if let Some(previous) = self.current.write().await.take() {
            info!(id = %previous.id, "Pricing tables cleared");
        }
    }
}

impl Default for PricingDataManager {
    fn default() -> Self {
        Self::new(DataConfig::default())
    }
}

impl std::fmt::Debug for PricingDataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingDataManager")
            .field("config", &self.config)
            .field("ready", &self.is_ready())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

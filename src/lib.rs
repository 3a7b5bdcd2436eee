//! Books and comments HTTP API.
//!
//! Handlers validate and paginate on top of an injected [`RecordStore`];
//! transport and storage live in the `bookstore-http` and `bookstore-db` crates.

pub mod modules;
pub mod pagination;
pub mod request;
pub mod validation;

use std::sync::Arc;

use anyhow::Context;
use bookstore_db::{RecordStore, SqliteStore};
use bookstore_kernel::settings::{DatabaseSettings, Settings};
use bookstore_kernel::{InitCtx, ModuleRegistry};

/// Store handle shared by every handler.
pub type SharedStore = Arc<dyn RecordStore>;

/// Registry holding the books and comments modules wired to `store`.
pub fn build_registry(store: SharedStore) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store)?;
    Ok(registry)
}

/// Open the configured SQLite database, applying pending migrations.
pub fn open_store(settings: &DatabaseSettings) -> anyhow::Result<SqliteStore> {
    SqliteStore::open(&settings.path, settings.busy_timeout())
        .with_context(|| format!("failed to open database '{}'", settings.path))
}

/// Bootstrap the store and modules, then serve until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = open_store(&settings.database)?;
    let registry = build_registry(Arc::new(store))?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookstore_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}

pub mod books;
pub mod comments;

use std::sync::Arc;

use bookstore_kernel::ModuleRegistry;

use crate::SharedStore;

/// Register the resource modules, books first so its routes mount before the nested comments.
pub fn register_all(registry: &mut ModuleRegistry, store: SharedStore) -> anyhow::Result<()> {
    registry.register(Arc::new(books::BooksModule::new(store.clone())))?;
    registry.register(Arc::new(comments::CommentsModule::new(store)))?;
    Ok(())
}

use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A unit of HTTP surface: routes, their OpenAPI fragment, and lifecycle hooks.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Path prefix the module's routes are nested under.
    /// Defaults to `/{name}`; may contain path captures.
    fn mount_path(&self) -> String {
        format!("/{}", self.name())
    }

    /// Initialize the module with the provided context
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes, relative to [`Module::mount_path`]
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment (`paths` relative to the mount path, plus `components`)
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Called after every module is initialized, before the server accepts requests
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

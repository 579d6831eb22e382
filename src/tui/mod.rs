pub mod action;
mod app;
pub mod browser;
mod event;
mod terminal;
pub mod theme;
pub mod components;

use std::sync::Arc;

use crate::config::types::BrowseConfig;
use crate::dao::{AccessorFactory, Gvr};
use crate::error::BrowseError;

/// Launch the interactive browser for one resource kind.
///
/// Creates a tokio runtime and runs the async TUI event loop. The terminal
/// uses the alternate screen and raw mode and is restored on exit,
/// including on panic.
pub fn launch_tui(
    gvr: Gvr,
    config: BrowseConfig,
    factory: Arc<dyn AccessorFactory>,
    namespace: Option<String>,
) -> Result<(), BrowseError> {
    tracing::info!(gvr = %gvr, read_only = config.is_read_only(), "Starting TUI");
    let rt = tokio::runtime::Runtime::new()?;
    let app = app::App::new(gvr, config, factory, namespace);
    rt.block_on(app::run_app(app))?;
    Ok(())
}

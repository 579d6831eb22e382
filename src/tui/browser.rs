//! The resource browser: table, flash line and overlay pages for one kind.

use std::sync::Arc;

use ratatui::crossterm::event::KeyEvent;

use super::action::Action;
use super::components::flash::Flash;
use super::components::pages::Pages;
use super::components::resource_table::ResourceTable;
use super::components::Component;
use crate::config::types::BrowseConfig;
use crate::dao::{AccessorFactory, CallContext, Gvr};
use crate::view::{FeedbackSink, InputGate, PageRegistry, ResourceViewer, SelectionSource};

/// Ticks between automatic reloads (4 ticks per second).
const RELOAD_TICKS: u32 = 8;

pub struct Browser {
    gvr: Gvr,
    config: BrowseConfig,
    factory: Arc<dyn AccessorFactory>,
    namespace: Option<String>,
    table: ResourceTable,
    flash: Flash,
    pages: Pages,
    gate: InputGate,
    ticks: u32,
}

impl Browser {
    pub fn new(
        gvr: Gvr,
        config: BrowseConfig,
        factory: Arc<dyn AccessorFactory>,
        namespace: Option<String>,
    ) -> Self {
        Self {
            table: ResourceTable::new(gvr.clone()),
            gvr,
            config,
            factory,
            namespace,
            flash: Flash::new(),
            pages: Pages::new(),
            gate: InputGate::new(),
            ticks: 0,
        }
    }

    /// Fetch the rows again. Failures go to the flash line.
    pub fn reload(&mut self) {
        let ctx = CallContext::with_timeout(self.config.call_timeout());
        let res = self
            .factory
            .accessor_for(&self.gvr)
            .and_then(|acc| acc.list(&ctx, self.namespace.as_deref()));
        match res {
            Ok(data) => self.table.set_data(data),
            Err(err) => {
                tracing::error!(gvr = %self.gvr, error = %err, "Listing resources failed");
                self.flash.err(&err);
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.flash.update();
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % RELOAD_TICKS == 0 && !self.gate.is_stopped() && self.pages.front().is_none() {
            self.reload();
        }
    }

    /// Route a key to the table, unless input is stopped.
    pub fn handle_table_key(&mut self, key: KeyEvent) -> Action {
        if self.gate.is_stopped() {
            return Action::Noop;
        }
        self.table.handle_key_event(key)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    pub fn flash_line(&self) -> &Flash {
        &self.flash
    }

    pub fn overlay(&self) -> &Pages {
        &self.pages
    }

    pub fn overlay_mut(&mut self) -> &mut Pages {
        &mut self.pages
    }
}

impl ResourceViewer for Browser {
    fn gvr(&self) -> &Gvr {
        &self.gvr
    }

    fn config(&self) -> &BrowseConfig {
        &self.config
    }

    fn factory(&self) -> Arc<dyn AccessorFactory> {
        Arc::clone(&self.factory)
    }

    fn selection(&self) -> &dyn SelectionSource {
        &self.table
    }

    fn flash(&mut self) -> &mut dyn FeedbackSink {
        &mut self.flash
    }

    fn pages(&mut self) -> &mut dyn PageRegistry {
        &mut self.pages
    }

    fn gate(&self) -> &InputGate {
        &self.gate
    }
}

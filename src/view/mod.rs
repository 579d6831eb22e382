//! Resource viewer seams and the extensions built on them.
//!
//! A viewer exposes its table selection, a flash line for feedback, a page
//! registry for modal dialogs and a gate over its input processing.
//! Extensions such as [`pause::PauseExtender`] only talk to the viewer
//! through [`ResourceViewer`].

pub mod keys;
pub mod pause;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::types::BrowseConfig;
use crate::dao::{AccessorFactory, Gvr};
use crate::error::BrowseError;
use crate::tui::components::modal_form::ModalForm;

/// Row selection of a table.
pub trait SelectionSource {
    /// Paths of the selected rows, in table order.
    fn selected_items(&self) -> Vec<String>;

    /// Column index for a header name.
    fn header_index(&self, column: &str) -> Option<usize>;

    /// Cell of the row under the cursor, `None` when there is no such row.
    fn selected_cell(&self, column: usize) -> Option<String>;
}

/// Where user-visible outcomes are reported.
pub trait FeedbackSink {
    fn info(&mut self, msg: String);

    fn err(&mut self, err: &BrowseError);
}

/// Overlay pages keyed by name.
pub trait PageRegistry {
    /// Add (or replace) the page stored under `key`.
    fn add_page(&mut self, key: &str, form: ModalForm, resize: bool, visible: bool);

    /// Make `key` visible and bring it to the front.
    fn show_page(&mut self, key: &str);

    fn remove_page(&mut self, key: &str);

    fn has_page(&self, key: &str) -> bool;
}

/// Suspends a viewer's input processing while held open.
///
/// [`InputGate::stop`] hands out a guard; input resumes once every guard
/// has been dropped.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    stops: Arc<AtomicUsize>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) -> GateGuard {
        self.stops.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("Viewer input stopped");
        GateGuard {
            stops: Arc::clone(&self.stops),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stops.load(Ordering::SeqCst) > 0
    }
}

/// Restarts input processing on drop.
#[derive(Debug)]
pub struct GateGuard {
    stops: Arc<AtomicUsize>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.stops.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!("Viewer input started");
    }
}

/// What an extension can reach of its host viewer.
pub trait ResourceViewer {
    /// Resource kind in view.
    fn gvr(&self) -> &Gvr;

    fn config(&self) -> &BrowseConfig;

    fn factory(&self) -> Arc<dyn AccessorFactory>;

    fn selection(&self) -> &dyn SelectionSource;

    fn flash(&mut self) -> &mut dyn FeedbackSink;

    fn pages(&mut self) -> &mut dyn PageRegistry;

    fn gate(&self) -> &InputGate;
}

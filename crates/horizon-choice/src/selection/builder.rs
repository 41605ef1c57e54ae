//! Construction of selection controllers.
//!
//! Flags are fixed for the lifetime of a controller. To reconfigure at
//! runtime, seed a builder from the existing controller with
//! [`SelectionController::to_builder`], override what should change, and
//! build a new one. The original is left untouched.

use std::hash::Hash;
use std::sync::Arc;

use super::{ChangedCallback, CloseModalCallback, SelectionController};
use crate::config::ChoiceConfig;
use crate::filter::FilterNotifier;

/// Builder for [`SelectionController`].
///
/// # Example
///
/// ```
/// use horizon_choice::SelectionBuilder;
///
/// let selection = SelectionBuilder::new()
///     .value(["red".to_string()])
///     .multiple(true)
///     .clearable(true)
///     .build();
///
/// assert!(selection.selected(&"red".to_string()));
/// ```
pub struct SelectionBuilder<T> {
    pub(super) value: Vec<T>,
    pub(super) config: ChoiceConfig,
    pub(super) on_changed: Option<ChangedCallback<T>>,
    pub(super) on_close_modal: Option<CloseModalCallback<T>>,
    pub(super) filter: Option<Arc<dyn FilterNotifier>>,
}

impl<T> Default for SelectionBuilder<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            config: ChoiceConfig::default(),
            on_changed: None,
            on_close_modal: None,
            filter: None,
        }
    }
}

impl<T> SelectionBuilder<T>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Create a builder with the default configuration and no value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value. Duplicates are discarded.
    pub fn value(mut self, value: impl IntoIterator<Item = T>) -> Self {
        self.value = value.into_iter().collect();
        self
    }

    /// Replace all flags and the title with a configuration.
    pub fn config(mut self, config: ChoiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Make selection additive (multi) instead of single-replace.
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    /// Allow the selection to become empty through removal.
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.config.clearable = clearable;
        self
    }

    /// Require an explicit confirm before a single selection closes the prompt.
    pub fn confirmation(mut self, confirmation: bool) -> Self {
        self.config.confirmation = confirmation;
        self
    }

    /// Set the prompt title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Remove the prompt title.
    pub fn without_title(mut self) -> Self {
        self.config.title = None;
        self
    }

    /// Set the callback invoked with the full value after every committed
    /// mutation.
    ///
    /// The value is read after subscribers have been notified. If a
    /// subscriber mutates the selection during that notification, the
    /// callback for the outer mutation sees the state left by the nested one,
    /// so the same value can arrive twice and intermediate states are never
    /// delivered. Track deltas by comparing against the previous value.
    pub fn on_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        self.on_changed = Some(Arc::new(callback));
        self
    }

    /// Set the callback invoked when the prompt should close.
    ///
    /// Receives the value on a confirmed close and `None` on dismissal.
    pub fn on_close_modal<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&[T]>) + Send + Sync + 'static,
    {
        self.on_close_modal = Some(Arc::new(callback));
        self
    }

    /// Attach a filter. The controller forwards its notifications and hides
    /// it when the prompt closes.
    pub fn filter(mut self, filter: Arc<dyn FilterNotifier>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Detach the filter.
    pub fn without_filter(mut self) -> Self {
        self.filter = None;
        self
    }

    /// Build the controller.
    pub fn build(self) -> SelectionController<T> {
        SelectionController::from_builder(self)
    }
}

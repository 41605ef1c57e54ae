//! Filter collaborator for choice prompts.
//!
//! The selection core only needs two things from a filter: a way to hide it
//! when the prompt closes, and a change stream it can forward to its own
//! subscribers. [`FilterNotifier`] captures exactly that, so the core can be
//! driven by [`FilterController`] or by any stub.
//!
//! `FilterController` owns the query text and its visibility. It does not
//! decide which choices match; that stays with the composition layer.

use std::sync::Arc;

use horizon_choice_core::logging::targets;
use horizon_choice_core::{ConnectionId, Property, Signal};

/// A change listener registered on a filter.
pub type FilterListener = Arc<dyn Fn() + Send + Sync>;

/// The capabilities a selection controller needs from a filter.
pub trait FilterNotifier: Send + Sync {
    /// Register a listener invoked whenever the filter's state changes.
    fn subscribe(&self, listener: FilterListener) -> ConnectionId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ConnectionId) -> bool;

    /// Hide the filter. Called when the prompt closes.
    fn hide(&self);
}

/// Free-text filter state: query text plus visibility.
///
/// # Signals
///
/// - `changed`: Emitted once per call that actually changed text or visibility
#[derive(Default)]
pub struct FilterController {
    text: Property<String>,
    visible: Property<bool>,
    changed: Signal<()>,
}

impl FilterController {
    /// Create a hidden filter with an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Whether the filter input is shown.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Whether the filter is shown with a non-empty query.
    pub fn is_filtering(&self) -> bool {
        self.is_visible() && self.text.with(|text| !text.is_empty())
    }

    /// The change signal.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// Show the filter input.
    pub fn show(&self) {
        if self.visible.set(true) {
            tracing::debug!(target: targets::FILTER, "filter shown");
            self.changed.emit(());
        }
    }

    /// Hide the filter input and drop the query.
    pub fn hide(&self) {
        let hidden = self.visible.set(false);
        let cleared = self.text.set(String::new());
        if hidden || cleared {
            tracing::debug!(target: targets::FILTER, "filter hidden");
            self.changed.emit(());
        }
    }

    /// Show the filter if hidden, hide it if shown.
    pub fn toggle(&self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Set the query text.
    pub fn apply(&self, query: impl Into<String>) {
        let query = query.into();
        if self.text.set(query) {
            tracing::trace!(target: targets::FILTER, "filter query applied");
            self.changed.emit(());
        }
    }

    /// Empty the query text, keeping visibility.
    pub fn clear(&self) {
        self.apply(String::new());
    }
}

impl FilterNotifier for FilterController {
    fn subscribe(&self, listener: FilterListener) -> ConnectionId {
        self.changed.connect(move |_| listener())
    }

    fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    fn hide(&self) {
        FilterController::hide(self);
    }
}

static_assertions::assert_impl_all!(FilterController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted(filter: &FilterController) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        FilterNotifier::subscribe(
            filter,
            Arc::new(move || {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );
        count
    }

    #[test]
    fn test_filter_defaults() {
        let filter = FilterController::new();
        assert!(!filter.is_visible());
        assert!(filter.text().is_empty());
        assert!(!filter.is_filtering());
    }

    #[test]
    fn test_show_hide_notify_on_change_only() {
        let filter = FilterController::new();
        let count = counted(&filter);

        filter.show();
        filter.show();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        filter.hide();
        filter.hide();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_apply_and_hide_clears_query() {
        let filter = FilterController::new();
        filter.show();
        filter.apply("ban");
        assert!(filter.is_filtering());
        assert_eq!(filter.text(), "ban");

        filter.hide();
        assert!(filter.text().is_empty());
        assert!(!filter.is_filtering());
    }

    #[test]
    fn test_toggle() {
        let filter = FilterController::new();
        filter.toggle();
        assert!(filter.is_visible());
        filter.toggle();
        assert!(!filter.is_visible());
    }

    #[test]
    fn test_unsubscribe() {
        let filter = FilterController::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let id = FilterNotifier::subscribe(
            &filter,
            Arc::new(move || {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        filter.apply("a");
        assert!(FilterNotifier::unsubscribe(&filter, id));
        filter.apply("b");
        filter.clear();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

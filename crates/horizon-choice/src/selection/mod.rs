//! Selection state for choice prompts.
//!
//! This module provides [`SelectionController`], which owns the committed
//! selection of a dropdown, chip list or modal picker and the rules for
//! changing it.
//!
//! # Example
//!
//! ```
//! use horizon_choice::{CheckState, SelectionController};
//!
//! let selection = SelectionController::<&str>::builder()
//!     .multiple(true)
//!     .clearable(true)
//!     .on_changed(|value: &[&str]| println!("now {} selected", value.len()))
//!     .build();
//!
//! selection.select("apple", None);
//! selection.add("pear");
//!
//! assert_eq!(selection.selected_many(&["apple", "pear"]), CheckState::Checked);
//! assert_eq!(selection.selected_many(&["apple", "plum"]), CheckState::PartiallyChecked);
//! ```
//!
//! # Rules
//!
//! - A single-select controller never holds more than one value.
//! - A controller that is not clearable never becomes empty through
//!   [`remove`](SelectionController::remove),
//!   [`remove_all`](SelectionController::remove_all) or
//!   [`clear`](SelectionController::clear). It may still start empty.
//! - Every committed mutation emits the `changed` signal once, then calls the
//!   `on_changed` callback once with the full current value.
//! - Requests the rules forbid are silent no-ops. No operation returns an
//!   error.

mod builder;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use horizon_choice_core::logging::{span_names, targets};
use horizon_choice_core::{ConnectionId, PerfSpan, Property, Signal};

pub use builder::SelectionBuilder;

use crate::check_state::CheckState;
use crate::config::ChoiceConfig;
use crate::filter::FilterNotifier;

/// Callback receiving the full selection after a committed mutation.
pub type ChangedCallback<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Callback receiving the value on a confirmed close, `None` on dismissal.
pub type CloseModalCallback<T> = Arc<dyn Fn(Option<&[T]>) + Send + Sync>;

/// Result of applying a mutation to the committed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Changed,
    Unchanged,
    Guarded,
}

/// Manages the committed selection of a choice prompt.
///
/// Methods take `&self`; state lives behind a lock that is released before
/// any notification goes out, so subscribers may call back into the
/// controller while being notified.
///
/// # Signals
///
/// - `changed`: Emitted after each committed mutation, and whenever the
///   attached filter reports a change
pub struct SelectionController<T> {
    committed: Property<HashSet<T>>,
    multiple: bool,
    clearable: bool,
    confirmation: bool,
    title: Option<String>,
    on_changed: Option<ChangedCallback<T>>,
    on_close_modal: Option<CloseModalCallback<T>>,
    filter: Option<Arc<dyn FilterNotifier>>,
    filter_connection: Option<ConnectionId>,
    changed: Arc<Signal<()>>,
}

impl<T> SelectionController<T>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Start a builder with default flags.
    pub fn builder() -> SelectionBuilder<T> {
        SelectionBuilder::new()
    }

    /// Create a controller from a configuration and initial value.
    pub fn with_config(config: ChoiceConfig, value: impl IntoIterator<Item = T>) -> Self {
        SelectionBuilder::new().config(config).value(value).build()
    }

    fn from_builder(builder: SelectionBuilder<T>) -> Self {
        let SelectionBuilder {
            value,
            config,
            on_changed,
            on_close_modal,
            filter,
        } = builder;

        let changed = Arc::new(Signal::new());
        let filter_connection = filter.as_ref().map(|filter| {
            let signal = Arc::downgrade(&changed);
            filter.subscribe(Arc::new(move || forward(&signal)))
        });

        let committed = collect(value, config.multiple);
        tracing::debug!(
            target: targets::SELECTION,
            len = committed.len(),
            multiple = config.multiple,
            clearable = config.clearable,
            confirmation = config.confirmation,
            "selection created"
        );

        Self {
            committed: Property::new(committed),
            multiple: config.multiple,
            clearable: config.clearable,
            confirmation: config.confirmation,
            title: config.title,
            on_changed,
            on_close_modal,
            filter,
            filter_connection,
            changed,
        }
    }

    /// Seed a builder with this controller's current value, flags,
    /// callbacks and filter.
    ///
    /// Building from it yields an independent controller; this one is not
    /// modified.
    pub fn to_builder(&self) -> SelectionBuilder<T> {
        SelectionBuilder {
            value: self.value(),
            config: self.config(),
            on_changed: self.on_changed.clone(),
            on_close_modal: self.on_close_modal.clone(),
            filter: self.filter.clone(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Whether values accumulate instead of replacing each other.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the selection may become empty through removal.
    pub fn is_clearable(&self) -> bool {
        self.clearable
    }

    /// Whether a single selection waits for an explicit confirm.
    pub fn needs_confirmation(&self) -> bool {
        self.confirmation
    }

    /// The prompt title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The attached filter, if any.
    pub fn filter(&self) -> Option<&Arc<dyn FilterNotifier>> {
        self.filter.as_ref()
    }

    /// The flags and title as a configuration.
    pub fn config(&self) -> ChoiceConfig {
        ChoiceConfig {
            multiple: self.multiple,
            clearable: self.clearable,
            confirmation: self.confirmation,
            title: self.title.clone(),
        }
    }

    // =========================================================================
    // Notification
    // =========================================================================

    /// Register a listener for change notifications.
    pub fn subscribe<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.changed.connect(move |_| listener())
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    /// The underlying change signal.
    pub fn changed(&self) -> &Arc<Signal<()>> {
        &self.changed
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The committed values. Order is unspecified.
    pub fn value(&self) -> Vec<T> {
        self.committed.with(|set| set.iter().cloned().collect())
    }

    /// Any one committed value. Meant for single-select controllers.
    pub fn single(&self) -> Option<T> {
        self.committed.with(|set| set.iter().next().cloned())
    }

    /// Number of committed values.
    pub fn len(&self) -> usize {
        self.committed.with(HashSet::len)
    }

    /// Check whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.committed.with(HashSet::is_empty)
    }

    /// Check whether anything is selected.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Check whether a value is selected.
    pub fn selected(&self, item: &T) -> bool {
        self.committed.with(|set| set.contains(item))
    }

    /// Check whether at least one candidate is selected.
    pub fn any(&self, candidates: &[T]) -> bool {
        self.committed
            .with(|set| candidates.iter().any(|item| set.contains(item)))
    }

    /// Check whether every candidate is selected.
    pub fn every(&self, candidates: &[T]) -> bool {
        self.committed
            .with(|set| candidates.iter().all(|item| set.contains(item)))
    }

    /// Tri-state membership of a group of candidates.
    pub fn selected_many(&self, candidates: &[T]) -> CheckState {
        CheckState::from_membership(self.any(candidates), self.every(candidates))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a value. No-op if it is already selected.
    ///
    /// A single-select controller replaces its value instead.
    pub fn add(&self, item: T) {
        if self.selected(&item) {
            self.finish("add", Mutation::Unchanged);
            return;
        }
        if !self.multiple {
            self.replace([item]);
            return;
        }
        let outcome = self.committed.update(|set| {
            if set.insert(item) {
                Mutation::Changed
            } else {
                Mutation::Unchanged
            }
        });
        self.finish("add", outcome);
    }

    /// Remove a value.
    ///
    /// Refused when the controller is not clearable and holds exactly one
    /// value.
    pub fn remove(&self, item: &T) {
        let clearable = self.clearable;
        let outcome = self.committed.update(|set| {
            if !clearable && set.len() == 1 {
                Mutation::Guarded
            } else if set.remove(item) {
                Mutation::Changed
            } else {
                Mutation::Unchanged
            }
        });
        self.finish("remove", outcome);
    }

    /// Remove every candidate that is selected, in one notification.
    ///
    /// Refused entirely when the controller is not clearable and the
    /// candidates cover the whole selection.
    pub fn remove_all(&self, candidates: &[T]) {
        let clearable = self.clearable;
        let candidates: HashSet<&T> = candidates.iter().collect();
        let outcome = self.committed.update(|set| {
            if !clearable && set.iter().all(|item| candidates.contains(item)) {
                return Mutation::Guarded;
            }
            let before = set.len();
            set.retain(|item| !candidates.contains(item));
            if set.len() != before {
                Mutation::Changed
            } else {
                Mutation::Unchanged
            }
        });
        self.finish("remove_all", outcome);
    }

    /// Set the selection to exactly `candidates`. Always notifies.
    ///
    /// A single-select controller keeps only the first distinct candidate.
    pub fn replace(&self, candidates: impl IntoIterator<Item = T>) {
        let next = collect(candidates, self.multiple);
        self.committed.set_silent(next);
        self.finish("replace", Mutation::Changed);
    }

    /// Empty the selection. No-op unless the controller is clearable.
    pub fn clear(&self) {
        if !self.clearable {
            self.finish("clear", Mutation::Guarded);
            return;
        }
        self.committed.update(HashSet::clear);
        self.finish("clear", Mutation::Changed);
    }

    /// Toggle a value, the primary user-facing selection gesture.
    ///
    /// `active` defaults to the opposite of the current membership. Selecting
    /// adds in multi-select and replaces in single-select; deselecting
    /// removes. A single-select controller without confirmation then closes
    /// the prompt as confirmed.
    pub fn select(&self, item: T, active: Option<bool>) {
        let active = active.unwrap_or_else(|| !self.selected(&item));
        if active {
            if self.multiple {
                self.add(item);
            } else {
                self.replace([item]);
            }
        } else {
            self.remove(&item);
        }

        if !self.confirmation && !self.multiple {
            self.close_modal(true);
        }
    }

    /// Select or deselect a group of values.
    ///
    /// `active` defaults to `false`. Selecting replaces the whole selection
    /// with `candidates`; deselecting behaves as [`remove_all`](Self::remove_all).
    pub fn select_many(&self, candidates: &[T], active: Option<bool>) {
        if active.unwrap_or(false) {
            self.replace(candidates.iter().cloned());
        } else {
            self.remove_all(candidates);
        }
    }

    /// Create a handler for a binary toggle control bound to one value.
    ///
    /// The handler ignores requests that match the current membership, so
    /// repeated UI events do not produce duplicate notifications. Otherwise
    /// it calls [`select`](Self::select) and then `on_changed` with the new
    /// value. It does nothing once the controller is dropped.
    pub fn on_selected(
        self: &Arc<Self>,
        item: T,
        on_changed: Option<ChangedCallback<T>>,
    ) -> impl Fn(Option<bool>) + Send + Sync + use<T> {
        let controller = Arc::downgrade(self);
        move |active| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            if active == Some(controller.selected(&item)) {
                return;
            }
            controller.select(item.clone(), active);
            if let Some(callback) = &on_changed {
                callback(&controller.value());
            }
        }
    }

    /// Create a handler for a "select all" control bound to a group of values.
    ///
    /// Unlike [`on_selected`](Self::on_selected) there is no idempotence
    /// guard: every invocation calls [`select_many`](Self::select_many) and
    /// then `on_changed`.
    pub fn on_selected_many(
        self: &Arc<Self>,
        candidates: Vec<T>,
        on_changed: Option<ChangedCallback<T>>,
    ) -> impl Fn(Option<bool>) + Send + Sync + use<T> {
        let controller = Arc::downgrade(self);
        move |active| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            controller.select_many(&candidates, active);
            if let Some(callback) = &on_changed {
                callback(&controller.value());
            }
        }
    }

    /// Request that the prompt close.
    ///
    /// Hides the filter, then hands the close callback the current value if
    /// `confirmed`, or `None` if dismissed. The selection is not modified.
    pub fn close_modal(&self, confirmed: bool) {
        self.close_modal_then(confirmed, || {});
    }

    /// Like [`close_modal`](Self::close_modal), then runs `on_closed`.
    pub fn close_modal_then<F>(&self, confirmed: bool, on_closed: F)
    where
        F: FnOnce(),
    {
        let _span = PerfSpan::new(span_names::CLOSE_MODAL);
        if let Some(filter) = &self.filter {
            filter.hide();
        }
        if let Some(callback) = &self.on_close_modal {
            if confirmed {
                callback(Some(&self.value()));
            } else {
                callback(None);
            }
        }
        tracing::debug!(target: targets::SELECTION, confirmed, "modal close requested");
        on_closed();
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Log the outcome and, for committed changes, notify subscribers and
    /// then the changed callback.
    ///
    /// The callback reads the value after delivery, so a nested mutation made
    /// by a subscriber is already visible to the outer callback.
    fn finish(&self, operation: &'static str, outcome: Mutation) {
        match outcome {
            Mutation::Guarded => {
                tracing::trace!(target: targets::SELECTION, operation, "mutation refused");
            }
            Mutation::Unchanged => {
                tracing::trace!(target: targets::SELECTION, operation, "mutation had no effect");
            }
            Mutation::Changed => {
                let _span = PerfSpan::new(span_names::SELECTION);
                tracing::debug!(target: targets::SELECTION, operation, len = self.len(), "selection changed");
                self.changed.emit(());
                if let Some(callback) = &self.on_changed {
                    callback(&self.value());
                }
            }
        }
    }
}

/// Re-emit a filter notification on the controller's signal.
fn forward(signal: &Weak<Signal<()>>) {
    if let Some(signal) = signal.upgrade() {
        tracing::trace!(target: targets::SELECTION, "forwarding filter change");
        signal.emit(());
    }
}

/// Deduplicate candidates in order; single-select keeps only the first.
fn collect<T: Eq + Hash>(candidates: impl IntoIterator<Item = T>, multiple: bool) -> HashSet<T> {
    let mut set = HashSet::new();
    for item in candidates {
        if !multiple && !set.is_empty() {
            break;
        }
        set.insert(item);
    }
    set
}

impl<T> Drop for SelectionController<T> {
    fn drop(&mut self) {
        if let (Some(filter), Some(id)) = (&self.filter, self.filter_connection) {
            filter.unsubscribe(id);
        }
    }
}

impl<T> fmt::Debug for SelectionController<T>
where
    T: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("committed", &self.committed)
            .field("multiple", &self.multiple)
            .field("clearable", &self.clearable)
            .field("confirmation", &self.confirmation)
            .field("title", &self.title)
            .field("has_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(SelectionController<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(selection: &SelectionController<&'static str>) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        selection.subscribe(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    fn sorted(mut value: Vec<&'static str>) -> Vec<&'static str> {
        value.sort_unstable();
        value
    }

    #[test]
    fn test_initial_value_is_deduplicated() {
        let selection = SelectionController::builder()
            .multiple(true)
            .value(["a", "b", "a"])
            .build();
        assert_eq!(sorted(selection.value()), vec!["a", "b"]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_single_select_keeps_first_initial_value() {
        let selection = SelectionController::builder().value(["a", "b"]).build();
        assert_eq!(selection.value(), vec!["a"]);
        assert_eq!(selection.single(), Some("a"));
    }

    #[test]
    fn test_queries_on_empty() {
        let selection = SelectionController::<&str>::builder().build();
        assert!(selection.is_empty());
        assert!(!selection.is_not_empty());
        assert_eq!(selection.single(), None);
        assert!(!selection.any(&["a"]));
        assert!(selection.every(&[]));
        assert_eq!(selection.selected_many(&["a"]), CheckState::Unchecked);
    }

    #[test]
    fn test_add_is_noop_when_present() {
        let selection = SelectionController::builder()
            .multiple(true)
            .value(["a"])
            .build();
        let count = counter(&selection);

        selection.add("a");
        assert_eq!(count.load(Ordering::SeqCst), 0);

        selection.add("b");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(sorted(selection.value()), vec!["a", "b"]);
    }

    #[test]
    fn test_add_replaces_in_single_mode() {
        let selection = SelectionController::builder().value(["a"]).build();
        selection.add("b");
        assert_eq!(selection.value(), vec!["b"]);
    }

    #[test]
    fn test_remove_absent_does_not_notify() {
        let selection = SelectionController::builder()
            .multiple(true)
            .clearable(true)
            .value(["a"])
            .build();
        let count = counter(&selection);

        selection.remove(&"z");
        assert_eq!(count.load(Ordering::SeqCst), 0);

        selection.remove(&"a");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_remove_guard_allows_shrinking_to_one() {
        let selection = SelectionController::builder()
            .multiple(true)
            .value(["a", "b"])
            .build();

        selection.remove(&"a");
        assert_eq!(selection.value(), vec!["b"]);

        selection.remove(&"b");
        assert_eq!(selection.value(), vec!["b"]);
    }

    #[test]
    fn test_remove_all_partial_when_not_clearable() {
        let selection = SelectionController::builder()
            .multiple(true)
            .value(["a", "b", "c"])
            .build();
        let count = counter(&selection);

        selection.remove_all(&["a", "b", "c", "d"]);
        assert_eq!(selection.len(), 3);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        selection.remove_all(&["a", "b", "d"]);
        assert_eq!(selection.value(), vec!["c"]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_all_without_intersection_is_silent() {
        let selection = SelectionController::builder()
            .multiple(true)
            .clearable(true)
            .value(["a"])
            .build();
        let count = counter(&selection);

        selection.remove_all(&["x", "y"]);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_replace_always_notifies() {
        let selection = SelectionController::builder()
            .multiple(true)
            .value(["a"])
            .build();
        let count = counter(&selection);

        selection.replace(["a"]);
        selection.replace(["a"]);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(selection.value(), vec!["a"]);
    }

    #[test]
    fn test_replace_single_mode_keeps_first() {
        let selection = SelectionController::builder().build();
        selection.replace(["x", "y", "z"]);
        assert_eq!(selection.value(), vec!["x"]);
    }

    #[test]
    fn test_clear() {
        let fixed = SelectionController::builder()
            .multiple(true)
            .value(["a", "b"])
            .build();
        let count = counter(&fixed);
        fixed.clear();
        assert_eq!(fixed.len(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        let clearable = SelectionController::builder()
            .multiple(true)
            .clearable(true)
            .value(["a", "b"])
            .build();
        let count = counter(&clearable);
        clearable.clear();
        assert!(clearable.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_select_toggles_by_default() {
        let selection = SelectionController::builder()
            .multiple(true)
            .clearable(true)
            .build();

        selection.select("a", None);
        assert!(selection.selected(&"a"));
        selection.select("a", None);
        assert!(!selection.selected(&"a"));
    }

    #[test]
    fn test_select_explicit_active() {
        let selection = SelectionController::builder()
            .multiple(true)
            .clearable(true)
            .build();

        selection.select("a", Some(true));
        selection.select("a", Some(true));
        assert_eq!(selection.value(), vec!["a"]);

        selection.select("a", Some(false));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_with_confirmation_does_not_close() {
        let closed = Arc::new(AtomicUsize::new(0));
        let closed_clone = closed.clone();
        let selection = SelectionController::<&str>::builder()
            .confirmation(true)
            .on_close_modal(move |_: Option<&[&str]>| {
                closed_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        selection.select("a", None);
        assert_eq!(selection.value(), vec!["a"]);
        assert_eq!(closed.load(Ordering::SeqCst), 0);

        selection.close_modal(true);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_select_many_defaults_to_deselect() {
        let selection = SelectionController::builder()
            .multiple(true)
            .clearable(true)
            .value(["a", "b", "c"])
            .build();

        selection.select_many(&["a", "b"], None);
        assert_eq!(selection.value(), vec!["c"]);

        selection.select_many(&["x", "y"], Some(true));
        assert_eq!(sorted(selection.value()), vec!["x", "y"]);
    }

    #[test]
    fn test_changed_callback_after_subscribers() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        let selection = SelectionController::<&str>::builder()
            .multiple(true)
            .on_changed(move |value: &[&str]| {
                events_clone.lock().push(format!("callback:{}", value.len()));
            })
            .build();

        let events_clone = events.clone();
        selection.subscribe(move || events_clone.lock().push("notify".to_string()));

        selection.add("a");
        assert_eq!(*events.lock(), vec!["notify", "callback:1"]);
    }

    #[test]
    fn test_close_modal_dismissed_passes_none() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        let selection = SelectionController::builder()
            .value(["a"])
            .confirmation(true)
            .on_close_modal(move |value: Option<&[&str]>| {
                received_clone.lock().push(value.map(<[&str]>::to_vec));
            })
            .build();

        let finished = Arc::new(AtomicUsize::new(0));
        let finished_clone = finished.clone();
        selection.close_modal_then(false, move || {
            finished_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(*received.lock(), vec![None]);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
        assert_eq!(selection.value(), vec!["a"]);
    }

    #[test]
    fn test_handler_is_noop_after_drop() {
        let selection = Arc::new(
            SelectionController::builder()
                .multiple(true)
                .build(),
        );
        let handler = selection.on_selected("a", None);
        drop(selection);
        handler(Some(true));
    }

    #[test]
    fn test_config_reflects_flags() {
        let selection = SelectionController::<&str>::with_config(
            ChoiceConfig::new().with_multiple(true).with_title("Tags"),
            ["a"],
        );
        assert!(selection.is_multiple());
        assert!(!selection.is_clearable());
        assert!(!selection.needs_confirmation());
        assert_eq!(selection.title(), Some("Tags"));
        assert_eq!(selection.config().title.as_deref(), Some("Tags"));
    }

    #[test]
    fn test_debug_output() {
        let selection = SelectionController::builder().value(["a"]).build();
        let text = format!("{:?}", selection);
        assert!(text.contains("SelectionController"));
        assert!(text.contains("\"a\""));
    }
}

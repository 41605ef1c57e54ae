//! Horizon Choice: selection state for choice prompts.
//!
//! This crate provides the headless core of single- and multi-select choice
//! widgets (dropdowns, chip lists, modal pickers). Rendering is left to the
//! composition layer, which reads state through accessors, mutates it through
//! the controller API, and re-renders when notified.
//!
//! # Core Types
//!
//! - [`SelectionController`]: Committed selection, flags, mutation API
//! - [`SelectionBuilder`]: Construction and copy-with-overrides
//! - [`FilterController`]: Filter text and visibility
//! - [`FilterNotifier`]: What a selection needs from a filter
//! - [`CheckState`]: Tri-state membership for "select all" controls
//! - [`ChoiceConfig`]: Serializable construction flags
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_choice::{FilterController, SelectionController};
//!
//! let filter = Arc::new(FilterController::new());
//! let selection = SelectionController::builder()
//!     .value(["small".to_string()])
//!     .filter(filter.clone())
//!     .on_close_modal(|value: Option<&[String]>| {
//!         println!("prompt closed with {:?}", value);
//!     })
//!     .build();
//!
//! filter.show();
//! filter.apply("lar");
//!
//! // Single-select without confirmation: choosing closes the prompt.
//! selection.select("large".to_string(), None);
//! assert_eq!(selection.single().as_deref(), Some("large"));
//! assert!(!filter.is_visible());
//! ```

mod check_state;
pub mod config;
pub mod error;
pub mod filter;
pub mod selection;

pub use check_state::CheckState;
pub use config::ChoiceConfig;
pub use error::{Error, Result};
pub use filter::{FilterController, FilterListener, FilterNotifier};
pub use selection::{ChangedCallback, CloseModalCallback, SelectionBuilder, SelectionController};

pub use horizon_choice_core::{ConnectionGuard, ConnectionId, Signal};

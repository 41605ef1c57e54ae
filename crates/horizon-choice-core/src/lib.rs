//! Core systems for Horizon Choice.
//!
//! This crate provides the notification primitives the choice controllers are
//! built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Example
//!
//! ```
//! use horizon_choice_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//!
//! let counter = Counter { value: Property::new(0), value_changed: Signal::new() };
//! counter.increment();
//! assert_eq!(counter.value.get(), 1);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};

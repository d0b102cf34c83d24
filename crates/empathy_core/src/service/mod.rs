//! Use-case layer consumed by UI bindings.
//!
//! # Responsibility
//! - Expose one owned state object ([`AppState`]) as the only entry point
//!   for reading and mutating user data.
//! - Keep UI/FFI layers decoupled from slot layout and storage details.

pub mod app_state;
pub mod observer;

pub use app_state::{AppState, BootstrapOptions};
pub use observer::{Listener, StateChange, SubscriptionId};

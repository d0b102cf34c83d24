//! Flutter-facing bindings for the empathy core.

pub mod api;

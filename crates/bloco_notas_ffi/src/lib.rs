//! Flutter-facing bindings for the notes engine.

pub mod api;

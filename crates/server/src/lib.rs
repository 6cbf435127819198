//! HTTP surface for showrunner: router, handlers, shared state and
//! server-side metrics. The binary in `main.rs` wires this to the real
//! Plex, Home Assistant and LLM clients.

pub mod api;
pub mod metrics;
pub mod state;

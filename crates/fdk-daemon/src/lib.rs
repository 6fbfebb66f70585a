//! fdk-daemon
//!
//! HTTP control surface for the challenge tracker.  `routes` owns the Axum
//! router and handlers, `state` the shared application state, `api_types`
//! the request/response shapes.  `main.rs` wires middleware and serves.

pub mod api_types;
pub mod routes;
pub mod state;

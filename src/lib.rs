//! Library crate for arena-live-back, exposing modules for binaries and integration tests.

/// Season timing configuration.
pub mod config;
/// Persistence layer for completed match records.
pub mod dao;
/// Request, response, and SSE payload definitions.
pub mod dto;
/// Service and application error types.
pub mod error;
/// HTTP route handlers.
pub mod routes;
/// Application services and background tasks.
pub mod services;
/// Shared in-memory state.
pub mod state;

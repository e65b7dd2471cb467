//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` carries event subscriptions and the
//! frame-rate drag gestures (`press_table`, `pointer_move`, `release`, ...)
//! that would be too chatty as REST calls.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;

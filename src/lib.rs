//! # seating-gateway
//!
//! Seating-chart editor engine for event planning, served over a REST API
//! and a WebSocket gateway.
//!
//! Each open chart is a [`domain::SeatingEditor`]: tables placed on a
//! grid-snapped canvas, guests seated up to each table's capacity, a
//! bounded undo/redo history and a pointer-driven drag controller. The
//! gateway keeps many charts in memory, broadcasts every committed change
//! and can mirror chart state into PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ChartService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── ChartRegistry (domain/)
//!     ├── SeatingEditor (domain/editor)
//!     │     geometry · hit_test · history · drag · assignment
//!     │
//!     └── ChartStore persistence (PostgreSQL or memory)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;

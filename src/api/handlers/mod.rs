//! REST endpoint handlers organized by resource.

pub mod chart;
pub mod guest;
pub mod history;
pub mod system;
pub mod table;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(chart::routes())
        .merge(table::routes())
        .merge(guest::routes())
        .merge(history::routes())
}

//! Service layer: business logic orchestration.
//!
//! [`ChartService`] coordinates chart operations, delegates editing to
//! [`crate::domain::SeatingEditor`], and emits events through the
//! [`super::domain::EventBus`].

pub mod chart_service;

pub use chart_service::{ChartService, HistoryStatus, NewChart, RestoredChart};

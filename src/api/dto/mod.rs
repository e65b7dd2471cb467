//! Data Transfer Objects for REST request/response serialization.
//!
//! Domain types that are already wire-shaped (`Table`, `Guest`, `Speech`,
//! `ChartSummary`, `TableSummary`) are returned as-is; the types here cover
//! request bodies, query strings and composite responses.

pub mod chart_dto;
pub mod common_dto;
pub mod guest_dto;
pub mod table_dto;

pub use chart_dto::*;
pub use common_dto::*;
pub use guest_dto::*;
pub use table_dto::*;

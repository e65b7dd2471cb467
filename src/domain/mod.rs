//! Domain layer: the seating-chart editor, chart registry and event system.
//!
//! The leaf modules (`geometry`, `hit_test`, `history`, `drag`,
//! `assignment`) are pure and synchronous. [`SeatingEditor`] composes them
//! into the per-chart aggregate. [`ChartRegistry`] and [`EventBus`] add the
//! concurrent, multi-chart server side.

pub mod assignment;
pub mod chart_entry;
pub mod chart_event;
pub mod chart_registry;
pub mod drag;
pub mod editor;
pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod guest;
pub mod history;
pub mod hit_test;
pub mod ids;
pub mod speech;
pub mod table;

pub use chart_entry::{ChartEntry, ChartSummary};
pub use chart_event::{ChartEvent, HistoryDirection};
pub use chart_registry::ChartRegistry;
pub use drag::{DragOutcome, DragState, DragUpdate, GestureSample};
pub use editor::{ChangeSet, EditorSettings, SeatingEditor, TableSummary};
pub use error::SeatingError;
pub use event_bus::EventBus;
pub use geometry::{GridSpec, Point, Rect, Size};
pub use guest::Guest;
pub use history::{HistoryStack, Snapshot};
pub use ids::{ChartId, GuestId, SpeechId, TableId};
pub use speech::{Speech, SpeechStatus};
pub use table::{Table, TableCategory, TableDraft, TableShape};

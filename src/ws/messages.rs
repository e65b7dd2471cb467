//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChartId, GestureSample, GuestId, TableId};
use crate::error::GatewayError;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Reply to the command with the given id.
    #[must_use]
    pub fn response(id: String, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Response,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Error reply with a numeric code.
    #[must_use]
    pub fn error(id: String, code: u32, message: &str) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Error,
            timestamp: Utc::now(),
            payload: serde_json::json!({
                "code": code,
                "message": message,
            }),
        }
    }

    /// Error reply carrying a gateway error's structured body.
    #[must_use]
    pub fn from_gateway_error(id: String, err: &GatewayError) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Error,
            timestamp: Utc::now(),
            payload: serde_json::to_value(err.to_body()).unwrap_or_default(),
        }
    }

    /// Broadcast event with a fresh id.
    #[must_use]
    pub fn event(payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            msg_type: WsMessageType::Event,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket, read from the
/// envelope's `payload`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific charts.
    Subscribe {
        /// Chart IDs to subscribe to. Use `["*"]` for all charts.
        chart_ids: Vec<String>,
    },
    /// Unsubscribe from events for specific charts.
    Unsubscribe {
        /// Chart IDs to unsubscribe from.
        chart_ids: Vec<String>,
    },
    /// Start dragging a table.
    PressTable {
        /// Target chart.
        chart_id: ChartId,
        /// Table under the pointer.
        table_id: TableId,
    },
    /// Pick up an unassigned guest.
    LongPressGuest {
        /// Target chart.
        chart_id: ChartId,
        /// Guest being picked up.
        guest_id: GuestId,
    },
    /// Pointer sample for the active gesture.
    PointerMove {
        /// Target chart.
        chart_id: ChartId,
        /// Pointer x on the canvas.
        #[serde(default)]
        x: f64,
        /// Pointer y on the canvas.
        #[serde(default)]
        y: f64,
        /// Cumulative x translation since the press.
        #[serde(default)]
        dx: f64,
        /// Cumulative y translation since the press.
        #[serde(default)]
        dy: f64,
    },
    /// End the active gesture and commit it.
    Release {
        /// Target chart.
        chart_id: ChartId,
    },
    /// Discard the active gesture.
    Cancel {
        /// Target chart.
        chart_id: ChartId,
    },
    /// Get full chart state.
    GetState {
        /// Target chart.
        chart_id: ChartId,
    },
}

impl WsCommand {
    /// Every accepted `command` value.
    pub const NAMES: [&'static str; 8] = [
        "subscribe",
        "unsubscribe",
        "press_table",
        "long_press_guest",
        "pointer_move",
        "release",
        "cancel",
        "get_state",
    ];

    /// Returns `true` if `name` is a known command.
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }
}

/// Builds a gesture sample from a `pointer_move` command.
#[must_use]
pub const fn gesture_sample(x: f64, y: f64, dx: f64, dy: f64) -> GestureSample {
    GestureSample { x, y, dx, dy }
}

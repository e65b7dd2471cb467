//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, gesture_sample};
use super::subscription::{SubscriptionManager, parse_chart_ids};
use crate::api::dto::ChartStateResponse;
use crate::domain::{ChartEvent, ChartId};
use crate::error::GatewayError;
use crate::service::ChartService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
/// - Cancels the drag gestures it started and left open when the socket
///   goes away.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<ChartEvent>,
    chart_service: Arc<ChartService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();
    let mut gestures = HashSet::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response =
                            handle_text_message(&text, &mut subs, &mut gestures, &chart_service)
                                .await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(chart_event) => {
                        if subs.matches(chart_event.chart_id()) {
                            let msg = WsMessage::event(
                                serde_json::to_value(&chart_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    for chart_id in gestures {
        match chart_service.cancel_drag(chart_id).await {
            Ok(true) => tracing::debug!(%chart_id, "drag cancelled on disconnect"),
            Ok(false) | Err(GatewayError::ChartNotFound(_)) => {}
            Err(err) => tracing::warn!(%chart_id, error = %err, "failed to cancel drag"),
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    gestures: &mut HashSet<ChartId>,
    service: &ChartService,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    let name = msg.payload.get("command").and_then(|v| v.as_str());
    if !name.is_some_and(WsCommand::is_known) {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    }

    let command = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(command) => command,
        Err(e) => {
            let message = format!("invalid command payload: {e}");
            return serde_json::to_string(&WsMessage::error(msg.id, 400, &message)).ok();
        }
    };

    let reply = match dispatch(command, subs, gestures, service).await {
        Ok(payload) => WsMessage::response(msg.id, payload),
        Err(err) => {
            tracing::debug!(error = %err, "ws command rejected");
            WsMessage::from_gateway_error(msg.id, &err)
        }
    };
    serde_json::to_string(&reply).ok()
}

/// Executes one command and builds the response payload. `gestures` holds
/// the charts on which this connection has an unfinished drag.
async fn dispatch(
    command: WsCommand,
    subs: &mut SubscriptionManager,
    gestures: &mut HashSet<ChartId>,
    service: &ChartService,
) -> Result<serde_json::Value, GatewayError> {
    let payload = match command {
        WsCommand::Subscribe { chart_ids } => {
            let (ids, wildcard) = parse_chart_ids(&chart_ids);
            subs.subscribe(&ids, wildcard);
            serde_json::json!({
                "subscribed": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "count": subs.count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        WsCommand::Unsubscribe { chart_ids } => {
            let (ids, wildcard) = parse_chart_ids(&chart_ids);
            subs.unsubscribe(&ids, wildcard);
            serde_json::json!({
                "unsubscribed": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "remaining_count": subs.count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        WsCommand::PressTable { chart_id, table_id } => {
            let drag = service.press_table(chart_id, table_id).await?;
            gestures.insert(chart_id);
            serde_json::json!({ "drag": drag })
        }
        WsCommand::LongPressGuest { chart_id, guest_id } => {
            let drag = service.long_press_guest(chart_id, guest_id).await?;
            gestures.insert(chart_id);
            serde_json::json!({ "drag": drag })
        }
        WsCommand::PointerMove {
            chart_id,
            x,
            y,
            dx,
            dy,
        } => {
            let update = service
                .pointer_move(chart_id, gesture_sample(x, y, dx, dy))
                .await?;
            serde_json::json!({ "update": update })
        }
        WsCommand::Release { chart_id } => {
            gestures.remove(&chart_id);
            let outcome = service.release(chart_id).await?;
            serde_json::json!({ "outcome": outcome })
        }
        WsCommand::Cancel { chart_id } => {
            gestures.remove(&chart_id);
            let cancelled = service.cancel_drag(chart_id).await?;
            serde_json::json!({ "cancelled": cancelled })
        }
        WsCommand::GetState { chart_id } => {
            let state = service
                .read(chart_id, |entry| ChartStateResponse::from(entry))
                .await?;
            serde_json::to_value(state).map_err(|e| GatewayError::Internal(e.to_string()))?
        }
    };
    Ok(payload)
}

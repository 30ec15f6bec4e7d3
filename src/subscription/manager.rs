use crate::state::{DashboardEngine, DashboardView};
use crate::subscription::protocol::{ClientMessage, DashboardUpdateMessage, ErrorMessage};
use axum::extract::ws::{Message, WebSocket};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Manages a single WebSocket viewer: pushes dashboard views, applies controls
pub struct ConnectionManager {
    connection_id: Uuid,
    engine: Arc<DashboardEngine>,
}

impl ConnectionManager {
    pub fn new(engine: Arc<DashboardEngine>) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            engine,
        }
    }

    /// Handle WebSocket connection lifecycle
    pub async fn handle(
        self,
        mut socket: WebSocket,
        mut update_rx: broadcast::Receiver<DashboardView>,
    ) {
        info!(connection_id = %self.connection_id, "WebSocket connection established");

        // Initial frame so the viewer doesn't wait for the next rotation
        if let Err(e) = send_view(&mut socket, self.engine.view()).await {
            error!(connection_id = %self.connection_id, error = %e, "Failed to send initial view");
            return;
        }

        loop {
            tokio::select! {
                // Handle incoming client messages
                msg = socket.recv() => {
                    match classify_incoming(msg) {
                        Incoming::Text(text) => {
                            if let Err(e) = self.handle_client_message(&mut socket, &text).await {
                                error!(connection_id = %self.connection_id, error = %e, "Error handling client message");
                            }
                        }
                        Incoming::Ping(data) => {
                            if let Err(e) = socket.send(Message::Pong(data)).await {
                                error!(error = %e, "Failed to send pong");
                                break;
                            }
                        }
                        Incoming::Ignored => {}
                        Incoming::Disconnected => {
                            info!(connection_id = %self.connection_id, "WebSocket client disconnected");
                            break;
                        }
                        Incoming::Failed(e) => {
                            warn!(connection_id = %self.connection_id, error = %e, "WebSocket error");
                            break;
                        }
                    }
                }

                // Forward recomputed views
                result = update_rx.recv() => {
                    let Some(view) = view_for_update(&self.engine, result) else {
                        break;
                    };
                    if let Err(e) = send_view(&mut socket, view).await {
                        error!(error = %e, "Failed to send dashboard update");
                        break;
                    }
                }
            }
        }

        info!(connection_id = %self.connection_id, "WebSocket connection closed");
    }

    /// Apply a viewer control. The resulting view reaches this socket through
    /// the broadcast channel like every other update.
    async fn handle_client_message(
        &self,
        socket: &mut WebSocket,
        text: &str,
    ) -> anyhow::Result<()> {
        let msg: ClientMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(e) => {
                send_error(socket, ErrorMessage::new(format!("invalid message: {}", e))).await?;
                return Ok(());
            }
        };

        debug!(connection_id = %self.connection_id, message = ?msg, "Client control received");

        if let Some(rejection) = apply_control(&self.engine, msg) {
            warn!(connection_id = %self.connection_id, error = %rejection.error, "Rejected client control");
            send_error(socket, rejection).await?;
        }

        Ok(())
    }
}

/// What the connection loop should do with one `socket.recv()` result
#[derive(Debug, PartialEq)]
pub(crate) enum Incoming {
    Text(String),
    Ping(Vec<u8>),
    /// Binary and pong frames
    Ignored,
    /// Close frame, or the stream ended
    Disconnected,
    Failed(String),
}

pub(crate) fn classify_incoming(msg: Option<Result<Message, axum::Error>>) -> Incoming {
    match msg {
        Some(Ok(Message::Text(text))) => Incoming::Text(text),
        Some(Ok(Message::Ping(data))) => Incoming::Ping(data),
        Some(Ok(Message::Close(_))) | None => Incoming::Disconnected,
        Some(Ok(_)) => Incoming::Ignored,
        Some(Err(e)) => Incoming::Failed(e.to_string()),
    }
}

/// Run a viewer control against the engine. Returns the error frame to send
/// back when the control is rejected; the dashboard is unchanged in that case.
pub(crate) fn apply_control(engine: &DashboardEngine, msg: ClientMessage) -> Option<ErrorMessage> {
    let result = match msg {
        ClientMessage::SelectRoom { room } => engine.select_room(&room).map(|_| ()),
        ClientMessage::SetLightLevel { value } => engine.set_light_level(&value).map(|_| ()),
        ClientMessage::ToggleLight => {
            engine.toggle_light();
            Ok(())
        }
        ClientMessage::NightLight => {
            engine.night_light();
            Ok(())
        }
    };

    result.err().map(|e| ErrorMessage::new(e.to_string()))
}

/// View to forward for a broadcast receive result. A lagged receiver only
/// cares about the newest state, so it resyncs from the engine. None once the
/// channel is closed.
pub(crate) fn view_for_update(
    engine: &DashboardEngine,
    result: Result<DashboardView, broadcast::error::RecvError>,
) -> Option<DashboardView> {
    match result {
        Ok(view) => Some(view),
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            warn!(skipped = skipped, "WebSocket lagged, skipped updates");
            Some(engine.view())
        }
        Err(broadcast::error::RecvError::Closed) => {
            error!("Dashboard broadcast channel closed");
            None
        }
    }
}

async fn send_view(socket: &mut WebSocket, view: DashboardView) -> anyhow::Result<()> {
    let json = serde_json::to_string(&DashboardUpdateMessage::from(view))?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}

async fn send_error(socket: &mut WebSocket, error: ErrorMessage) -> anyhow::Result<()> {
    let json = serde_json::to_string(&error)?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}

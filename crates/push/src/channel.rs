//! Push channel lifecycle: connect, announce, process, reconnect.
//!
//! [`PushChannel::open`] spawns one long-lived task per surface. The task
//! owns the WebSocket and forwards typed [`PushEvent`]s into a
//! [`tokio::sync::broadcast`] channel; any number of subscribers (the
//! projection, the roster, the UI shell) receive every event. Dropping is
//! explicit: [`PushChannel::shutdown`] cancels the task so events never
//! reach a torn-down view.

use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::client::PushClient;
use crate::events::PushEvent;
use crate::messages::parse_message;
use crate::reconnect::{reconnect_loop, ReconnectConfig};

/// Broadcast channel capacity for push events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Handle to one running push subscription.
pub struct PushChannel {
    event_tx: broadcast::Sender<PushEvent>,
    cancel: CancellationToken,
    task_handle: tokio::task::JoinHandle<()>,
}

impl PushChannel {
    /// Open the channel and spawn its connection task.
    ///
    /// The task connects, announces shop-room membership, processes frames
    /// until the connection drops, then reconnects with backoff —
    /// re-announcing membership after every successful reconnect.
    pub fn open(client: PushClient) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let task_tx = event_tx.clone();
        let task_cancel = cancel.clone();
        let task_handle = tokio::spawn(async move {
            tracing::info!(shop_id = %client.shop_id(), "Starting push channel task");
            run_channel_loop(&client, &task_tx, &task_cancel).await;
            tracing::info!(shop_id = %client.shop_id(), "Push channel task exited");
        });

        Self {
            event_tx,
            cancel,
            task_handle,
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<PushEvent> {
        self.event_tx.subscribe()
    }

    /// Tear the channel down: cancel the task and wait (bounded) for a
    /// clean exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), self.task_handle).await;
        tracing::info!("Push channel shut down");
    }
}

/// Core connection loop: connect -> announce -> process -> reconnect.
///
/// Runs until the cancellation token is triggered.
async fn run_channel_loop(
    client: &PushClient,
    event_tx: &broadcast::Sender<PushEvent>,
    cancel: &CancellationToken,
) {
    let reconnect_config = ReconnectConfig::default();

    loop {
        if cancel.is_cancelled() {
            return;
        }

        // Attempt to connect (or reconnect with backoff).
        let mut conn = match client.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(
                    shop_id = %client.shop_id(),
                    error = %e,
                    "Connection failed, entering reconnect loop",
                );
                match reconnect_loop(client, &reconnect_config, cancel).await {
                    Some(conn) => conn,
                    None => return, // cancelled
                }
            }
        };

        // Room membership does not survive the transport — announce on
        // every (re)connect.
        if let Err(e) = client.announce(&mut conn).await {
            tracing::warn!(
                shop_id = %client.shop_id(),
                error = %e,
                "Join announcement failed, reconnecting",
            );
            continue;
        }

        let _ = event_tx.send(PushEvent::Connected);

        // Process messages until the connection drops.
        process_frames(&mut conn.ws_stream, client, event_tx, cancel).await;

        let _ = event_tx.send(PushEvent::Disconnected);

        if cancel.is_cancelled() {
            return;
        }

        tracing::info!(shop_id = %client.shop_id(), "Push connection lost");
    }
}

/// Read frames from an open connection until it closes, a fatal receive
/// error occurs, or the channel is cancelled.
///
/// Each text frame is parsed via [`parse_message`]; the resulting variant
/// is mapped to a [`PushEvent`] and broadcast. Unknown or malformed
/// messages are logged and skipped.
async fn process_frames(
    ws_stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    client: &PushClient,
    event_tx: &broadcast::Sender<PushEvent>,
    cancel: &CancellationToken,
) {
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => return,
            frame = ws_stream.next() => frame,
        };

        match frame {
            Some(Ok(Message::Text(text))) => {
                handle_text_frame(&text, client, event_tx);
            }
            Some(Ok(Message::Binary(_))) => {
                tracing::trace!(shop_id = %client.shop_id(), "Ignoring binary push frame");
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                // Handled automatically by tungstenite.
            }
            Some(Ok(Message::Close(frame))) => {
                tracing::info!(shop_id = %client.shop_id(), ?frame, "Push WebSocket closed");
                return;
            }
            Some(Ok(Message::Frame(_))) => {}
            Some(Err(e)) => {
                tracing::error!(shop_id = %client.shop_id(), error = %e, "WebSocket receive error");
                return;
            }
            None => return,
        }
    }
}

/// Parse a single text frame and broadcast the mapped event.
fn handle_text_frame(text: &str, client: &PushClient, event_tx: &broadcast::Sender<PushEvent>) {
    match parse_message(text) {
        Ok(msg) => {
            let event = PushEvent::from_message(msg);
            tracing::debug!(shop_id = %client.shop_id(), ?event, "Push event");
            // SendError only means there are zero subscribers right now.
            let _ = event_tx.send(event);
        }
        Err(e) => {
            tracing::warn!(
                shop_id = %client.shop_id(),
                error = %e,
                raw_message = %text,
                "Failed to parse push message",
            );
        }
    }
}

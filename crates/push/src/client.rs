//! WebSocket client for the push channel.
//!
//! [`PushClient`] holds the connection configuration for one shop-scoped
//! subscription. Call [`PushClient::connect`] to establish a live
//! [`PushConnection`], then [`PushClient::announce`] to join the shop room.

use futures::SinkExt;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream};

use printdesk_core::types::ShopId;

use crate::messages::ClientMessage;

/// Configuration handle for the push channel of one shop.
pub struct PushClient {
    shop_id: ShopId,
    ws_url: String,
    /// Bearer credential announced with the join message on the owner
    /// surface; `None` on the customer surface.
    auth_token: Option<String>,
}

/// A live WebSocket connection to the push channel.
pub struct PushConnection {
    /// Unique client ID sent during the WebSocket handshake.
    pub client_id: String,
    /// The raw WebSocket stream for reading/writing frames.
    pub ws_stream: tokio_tungstenite::WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl PushClient {
    /// Create a new client for one shop's event stream.
    ///
    /// * `shop_id` - shop whose room to join.
    /// * `ws_url`  - WebSocket base URL, e.g. `ws://host:4000`.
    pub fn new(shop_id: ShopId, ws_url: String, auth_token: Option<String>) -> Self {
        Self {
            shop_id,
            ws_url,
            auth_token,
        }
    }

    /// Shop whose room this client joins.
    pub fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// WebSocket base URL.
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Connect to the push WebSocket endpoint.
    ///
    /// Generates a unique `client_id` (UUID v4) and appends it as a query
    /// parameter so the server can address messages back to this specific
    /// client.
    pub async fn connect(&self) -> Result<PushConnection, PushClientError> {
        let client_id = uuid::Uuid::new_v4().to_string();
        let url = format!("{}/ws?clientId={}", self.ws_url, client_id);

        let (ws_stream, _response) = connect_async(&url).await.map_err(|e| {
            PushClientError::Connection(format!(
                "Failed to connect to push channel at {}: {e}",
                self.ws_url
            ))
        })?;

        tracing::info!(
            shop_id = %self.shop_id,
            client_id = %client_id,
            "Connected to push channel at {}",
            self.ws_url,
        );

        Ok(PushConnection {
            client_id,
            ws_stream,
        })
    }

    /// Announce membership in the shop room on an open connection.
    ///
    /// Must be re-sent after every reconnect — room membership does not
    /// survive the transport.
    pub async fn announce(&self, conn: &mut PushConnection) -> Result<(), PushClientError> {
        let join = ClientMessage::JoinShopRoom {
            shop_id: self.shop_id.as_str().to_string(),
            auth: self.auth_token.clone(),
        };
        let json = serde_json::to_string(&join)
            .map_err(|e| PushClientError::Protocol(format!("Failed to encode join message: {e}")))?;

        conn.ws_stream
            .send(Message::Text(json))
            .await
            .map_err(|e| PushClientError::Protocol(format!("Failed to send join message: {e}")))?;

        tracing::debug!(shop_id = %self.shop_id, "Announced shop room membership");
        Ok(())
    }
}

/// Errors that can occur when working with the WebSocket client.
#[derive(Debug, thiserror::Error)]
pub enum PushClientError {
    /// Failed to establish the initial WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A protocol-level error on an already-established connection.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

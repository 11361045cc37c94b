mod beamer;
pub mod handlers;
mod host;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;

use crate::protocol::{ClientMessage, ServerMessage, PROTOCOL_VERSION};
use crate::state::AppState;
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub role: Option<String>,
}

pub fn parse_role(role: Option<&str>) -> Role {
    match role {
        Some("host") => Role::Host,
        Some("beamer") => Role::Beamer,
        _ => Role::Audience,
    }
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    tracing::info!("WebSocket connection request: role={:?}", params.role);
    let role = parse_role(params.role.as_deref());
    ws.on_upgrade(move |socket| handle_socket(socket, role, state))
}

/// First message on every connection: everything a screen needs to render
pub async fn welcome_message(state: &AppState, role: Role) -> ServerMessage {
    let presentation = state.get_presentation().await;
    ServerMessage::Welcome {
        protocol: PROTOCOL_VERSION.to_string(),
        role,
        session: state.snapshot().await,
        animation_type: presentation.animation_type,
        theme: presentation.theme,
        accent_color: presentation.theme.accent_color().to_string(),
        settings: presentation.draw,
        server_now: chrono::Utc::now().to_rfc3339(),
    }
}

async fn send_json(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize message: {}", e);
            true
        }
    }
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, role: Role, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!("WebSocket connected with role: {:?}", role);

    let welcome = welcome_message(&state, role.clone()).await;
    if !send_json(&mut sender, &welcome).await {
        tracing::error!("Failed to send welcome message");
        return;
    }

    // Subscribe to general broadcast (all clients)
    let mut broadcast_rx = state.broadcast.subscribe();

    // Subscribe to Host-specific broadcast if Host
    let mut host_broadcast_rx = if role == Role::Host {
        Some(state.host_broadcast.subscribe())
    } else {
        None
    };

    loop {
        tokio::select! {
            broadcast_msg = broadcast_rx.recv() => {
                match broadcast_msg {
                    Ok(msg) => {
                        if !send_json(&mut sender, &msg).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        // Missed updates; a fresh snapshot brings the screen back in sync
                        tracing::warn!("{:?} client lagged by {} messages", role, n);
                        let session = state.snapshot().await;
                        if !send_json(&mut sender, &ServerMessage::Session { session }).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }

            host_msg = async {
                match &mut host_broadcast_rx {
                    Some(rx) => rx.recv().await.ok(),
                    None => std::future::pending::<Option<ServerMessage>>().await,
                }
            } => {
                if let Some(msg) = host_msg {
                    if !send_json(&mut sender, &msg).await {
                        break;
                    }
                }
            }

            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message: {}", text);

                        let response = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => handlers::handle_message(client_msg, &role, &state).await,
                            Err(e) => {
                                tracing::warn!("Failed to parse client message: {}", e);
                                Some(ServerMessage::error(
                                    "PARSE_ERROR",
                                    format!("Invalid message format: {}", e),
                                ))
                            }
                        };
                        if let Some(response) = response {
                            if !send_json(&mut sender, &response).await {
                                tracing::error!("Failed to send response");
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!("WebSocket connection closed for role: {:?}", role);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role(Some("host")), Role::Host);
        assert_eq!(parse_role(Some("beamer")), Role::Beamer);
        assert_eq!(parse_role(Some("player")), Role::Audience);
        assert_eq!(parse_role(None), Role::Audience);
    }

    #[tokio::test]
    async fn test_welcome_carries_state() {
        let state = AppState::new();
        state.load_roster("A\nB").await;
        match welcome_message(&state, Role::Beamer).await {
            ServerMessage::Welcome {
                protocol,
                role,
                session,
                accent_color,
                ..
            } => {
                assert_eq!(protocol, PROTOCOL_VERSION);
                assert_eq!(role, Role::Beamer);
                assert_eq!(session.roster.len(), 2);
                assert!(accent_color.starts_with('#'));
            }
            other => panic!("Expected Welcome, got {:?}", other),
        }
    }
}

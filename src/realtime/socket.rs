use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use poem::http::StatusCode;
use poem::web::websocket::{Message, WebSocket};
use poem::web::{Data, Query};
use poem::{handler, FromRequest, IntoResponse, Request, Response};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::realtime::registry::ChannelRegistry;
use crate::services::TokenService;

/// Wiring for the websocket endpoint, shared through poem's Data extractor
#[derive(Clone)]
pub struct RealtimeState {
    pub token_service: Arc<TokenService>,
    pub registry: Arc<dyn ChannelRegistry>,
}

#[derive(Deserialize)]
pub struct ChannelAuth {
    token: Option<String>,
}

/// Live notification channel
///
/// The identity token is presented as a query parameter and verified once
/// at connection time; the resulting identity stays bound to the connection
/// for its lifetime. Inbound frames carry no protocol and are ignored.
#[handler]
pub async fn notification_channel(
    req: &Request,
    state: Data<&RealtimeState>,
    Query(auth): Query<ChannelAuth>,
) -> poem::Result<Response> {
    let Some(token) = auth.token else {
        return Ok(StatusCode::UNAUTHORIZED.into_response());
    };

    let claims = match state.token_service.verify(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("Rejected notification channel connection: {}", err);
            return Ok(StatusCode::UNAUTHORIZED.into_response());
        }
    };

    // Credentials are checked before the upgrade is negotiated, so a bad
    // token is answered with a plain 401 instead of a failed handshake.
    let ws = WebSocket::from_request_without_body(req).await?;

    let user_id = claims.sub;
    let registry = state.registry.clone();

    let response = ws
        .on_upgrade(move |socket| async move {
            let (mut sink, mut stream) = socket.split();
            let (sender, mut receiver) = mpsc::unbounded_channel();
            let connection_id = registry.attach(&user_id, sender).await;
            tracing::debug!("Notification channel open for {}", user_id);

            loop {
                tokio::select! {
                    push = receiver.recv() => {
                        let Some(push) = push else { break };
                        let Ok(text) = serde_json::to_string(&push) else { continue };
                        if sink.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    incoming = stream.next() => {
                        match incoming {
                            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                            Some(Ok(_)) => {}
                        }
                    }
                }
            }

            registry.detach(&user_id, connection_id).await;
            tracing::debug!("Notification channel closed for {}", user_id);
        })
        .into_response();

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::registry::InMemoryChannelRegistry;
    use poem::test::TestClient;
    use poem::{get, Endpoint, EndpointExt, Route};

    fn channel_client() -> TestClient<impl Endpoint> {
        let state = RealtimeState {
            token_service: Arc::new(TokenService::new(
                "test-secret-key-minimum-32-characters-long".to_string(),
            )),
            registry: Arc::new(InMemoryChannelRegistry::new()),
        };

        TestClient::new(
            Route::new()
                .at("/ws/notifications", get(notification_channel))
                .data(state),
        )
    }

    #[tokio::test]
    async fn test_connection_without_token_is_unauthorized() {
        let cli = channel_client();

        let response = cli.get("/ws/notifications").send().await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_connection_with_invalid_token_is_unauthorized() {
        let cli = channel_client();

        let response = cli.get("/ws/notifications?token=not-a-jwt").send().await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_a_foreign_secret_is_unauthorized() {
        let state = RealtimeState {
            token_service: Arc::new(TokenService::new(
                "test-secret-key-minimum-32-characters-long".to_string(),
            )),
            registry: Arc::new(InMemoryChannelRegistry::new()),
        };
        // Signed with a different secret, so verification fails
        let foreign = TokenService::new("another-secret-key-32-characters-xx".to_string())
            .issue("candidate-1")
            .unwrap();

        let cli = TestClient::new(
            Route::new()
                .at("/ws/notifications", get(notification_channel))
                .data(state),
        );

        let response = cli
            .get(format!("/ws/notifications?token={}", foreign))
            .send()
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

//! Per-connection lifecycle: register with the hub, split the socket
//! into a writer task draining the client's bounded queue and a reader
//! loop dispatching inbound frames to whichever `QuizManager` call
//! their `type` tag names.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::engine::events::{ClientMessage, ServerMessage};
use crate::state::AppState;

pub async fn handle_socket(socket: WebSocket, user_id: Uuid, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (client, mut rx) = state.hub.register(user_id).await;

    let ping_interval = state.config.hub_ping_interval;
    let writer = tokio::spawn(async move {
        let mut ping_timer = tokio::time::interval(ping_interval);
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    match msg {
                        Some(msg) => {
                            if sink.send(msg).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ping_timer.tick() => {
                    if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let read_timeout = state.config.hub_read_timeout;
    loop {
        let next = tokio::time::timeout(read_timeout, stream.next()).await;
        let frame = match next {
            Ok(Some(Ok(frame))) => frame,
            Ok(Some(Err(_))) | Ok(None) | Err(_) => break,
        };

        match frame {
            Message::Text(text) => dispatch(&state, user_id, &client, &text).await,
            Message::Close(_) => break,
            Message::Pong(_) | Message::Ping(_) | Message::Binary(_) => {}
        }
    }

    state.hub.unregister(user_id).await;
    writer.abort();
}

async fn dispatch(
    state: &AppState,
    user_id: Uuid,
    client: &std::sync::Arc<crate::realtime::client::Client>,
    text: &str,
) {
    let parsed: Result<ClientMessage, _> = serde_json::from_str(text);
    let Ok(message) = parsed else {
        let _ = send_direct(client, &ServerMessage::unknown_message_type());
        return;
    };

    match message {
        ClientMessage::UserReady { quiz_id } => {
            if let Err(e) = state.quiz_manager.handle_ready(user_id, quiz_id).await {
                let _ = send_direct(client, &ServerMessage::error(&e));
            }
        }
        ClientMessage::UserAnswer {
            question_id,
            selected_option,
            ..
        } => match state
            .quiz_manager
            .process_answer(user_id, question_id, selected_option)
            .await
        {
            Ok(reply) => {
                let _ = send_direct(client, &reply);
            }
            Err(e) => {
                let _ = send_direct(client, &ServerMessage::error(&e));
            }
        },
        ClientMessage::UserResync { quiz_id } => {
            match state.quiz_manager.get_current_state(user_id, quiz_id).await {
                Ok(current) => {
                    let _ = send_direct(
                        client,
                        &ServerMessage::QuizState {
                            phase: current.phase,
                            current_question: current.current_question,
                            time_remaining: current.time_remaining,
                            is_eliminated: current.is_eliminated,
                        },
                    );
                }
                Err(e) => {
                    let _ = send_direct(client, &ServerMessage::error(&e));
                }
            }
        }
        ClientMessage::UserHeartbeat {} => {
            let _ = send_direct(client, &ServerMessage::ServerHeartbeat {});
        }
    }
}

fn send_direct(
    client: &std::sync::Arc<crate::realtime::client::Client>,
    msg: &ServerMessage,
) -> Result<(), ()> {
    let bytes = serde_json::to_vec(msg).map_err(|_| ())?;
    if client.try_enqueue(Message::Binary(bytes.into())) {
        Ok(())
    } else {
        Err(())
    }
}

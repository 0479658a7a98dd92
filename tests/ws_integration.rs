//! End-to-end coverage over a real socket: schedule a quiz with the
//! harness's collapsed pre-start offsets, ready up over `/ws/{user_id}`,
//! and follow it through to the first question and an answer result.

mod common;

use std::time::Duration;

use common::ws_helper::WsConnection;

#[tokio::test]
async fn ready_up_then_answer_the_first_question() {
    let app = common::spawn_app().await;
    let factory = app.factory();

    let quiz_id = factory.create_quiz(1, 100).await;
    let question_id = factory
        .create_pool_question(1, &["paris", "london", "berlin"], 0)
        .await;

    let user_id = factory.create_user().await;

    let mut conn = WsConnection::connect(&app.ws_url(), user_id)
        .await
        .expect("failed to open test websocket");

    conn.send_json(&serde_json::json!({
        "type": "user:ready",
        "data": { "quiz_id": quiz_id },
    }))
    .await
    .expect("failed to send user:ready");

    app.state
        .quiz_manager
        .schedule(quiz_id, common::future_time(1))
        .await
        .expect("schedule should succeed");

    let start = conn
        .recv_until("quiz:start", Duration::from_secs(10))
        .await
        .expect("expected a quiz:start frame");
    assert_eq!(start["data"]["quiz_id"], quiz_id.to_string());

    let question = conn
        .recv_until("quiz:question", Duration::from_secs(10))
        .await
        .expect("expected a quiz:question frame");
    assert_eq!(question["data"]["number"], 1);
    let options = question["data"]["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);

    conn.send_json(&serde_json::json!({
        "type": "user:answer",
        "data": {
            "question_id": question_id,
            "selected_option": 0,
            "timestamp_ms": 0,
        },
    }))
    .await
    .expect("failed to send user:answer");

    let answer_result = conn
        .recv_until("quiz:answer_result", Duration::from_secs(5))
        .await
        .expect("expected an answer_result frame");
    assert_eq!(answer_result["data"]["is_correct"], true);
    assert_eq!(answer_result["data"]["score"], 1);

    let reveal = conn
        .recv_until("quiz:answer_reveal", Duration::from_secs(10))
        .await
        .expect("expected an answer reveal once the timer elapses");
    assert_eq!(reveal["data"]["correct_option"], 0);

    app.stop().await;
}

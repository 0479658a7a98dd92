//! Scheduler: drives a quiz through its pre-start phases and
//! fires the start at a precise instant. One lifecycle task per
//! scheduled quiz, tracked by a cancel handle so `Cancel` can interrupt
//! it at any point before `in_progress`.

use chrono::{NaiveDateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::config::Config;
use crate::db::quiz::QuizRepository;
use crate::engine::cancel::{pair, CancelHandle};
use crate::engine::events::ServerMessage;
use crate::errors::AppError;
use crate::models::enums::QuizStatus;
use crate::realtime::hub::Hub;

pub struct Scheduler {
    config: Arc<Config>,
    quiz_repo: QuizRepository,
    hub: Arc<Hub>,
    handles: Mutex<HashMap<Uuid, CancelHandle>>,
    quiz_start_tx: mpsc::Sender<Uuid>,
}

impl Scheduler {
    pub fn new(config: Arc<Config>, quiz_repo: QuizRepository, hub: Arc<Hub>) -> (Self, mpsc::Receiver<Uuid>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                config,
                quiz_repo,
                hub,
                handles: Mutex::new(HashMap::new()),
                quiz_start_tx: tx,
            },
            rx,
        )
    }

    /// Validates the start time, registers a cancel handle, and spawns
    /// the lifecycle task. Question availability is checked by the
    /// caller (Quiz Manager) before this is invoked.
    pub async fn schedule(&self, quiz_id: Uuid, title: String, start_time: NaiveDateTime) -> Result<(), AppError> {
        if start_time <= Utc::now().naive_utc() {
            return Err(AppError::InvalidTime(format!(
                "start_time {start_time} is not in the future"
            )));
        }

        let (handle, token) = pair();
        self.handles.lock().await.insert(quiz_id, handle);

        let config = self.config.clone();
        let quiz_repo = self.quiz_repo.clone();
        let hub = self.hub.clone();
        let quiz_start_tx = self.quiz_start_tx.clone();

        tokio::spawn(async move {
            run_lifecycle(config, quiz_repo, hub, quiz_start_tx, token, quiz_id, title, start_time).await;
        });

        Ok(())
    }

    /// `Cancel`: no-op if the quiz is no longer tracked (already
    /// started or never scheduled on this node).
    pub async fn cancel(&self, quiz_id: Uuid) {
        if let Some(handle) = self.handles.lock().await.remove(&quiz_id) {
            handle.cancel();
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_lifecycle(
    config: Arc<Config>,
    quiz_repo: QuizRepository,
    hub: Arc<Hub>,
    quiz_start_tx: mpsc::Sender<Uuid>,
    token: crate::engine::cancel::CancelToken,
    quiz_id: Uuid,
    title: String,
    start_time: NaiveDateTime,
) {
    let until = |offset: Duration| -> Option<Duration> {
        let target = start_time - chrono::Duration::from_std(offset).ok()?;
        let now = Utc::now().naive_utc();
        (target - now).to_std().ok()
    };

    if let Some(d) = until(config.announce_offset) {
        if !token.sleep(d).await {
            return cancel_quiz(&quiz_repo, &hub, quiz_id).await;
        }
    }
    let _ = hub
        .broadcast_to_quiz(
            quiz_id,
            &ServerMessage::QuizAnnouncement {
                quiz_id,
                title: title.clone(),
                start_time,
            },
        )
        .await;

    if let Some(d) = until(config.waiting_room_offset) {
        if !token.sleep(d).await {
            return cancel_quiz(&quiz_repo, &hub, quiz_id).await;
        }
    }
    let seconds_until_start = (start_time - Utc::now().naive_utc()).num_seconds().max(0);
    let _ = hub
        .broadcast_to_quiz(
            quiz_id,
            &ServerMessage::QuizWaitingRoom {
                seconds_until_start,
            },
        )
        .await;

    if let Some(d) = until(config.countdown_offset) {
        if !token.sleep(d).await {
            return cancel_quiz(&quiz_repo, &hub, quiz_id).await;
        }
    }

    loop {
        let remaining = (start_time - Utc::now().naive_utc()).num_seconds();
        if remaining <= 0 {
            break;
        }
        let _ = hub
            .broadcast_to_quiz(
                quiz_id,
                &ServerMessage::QuizCountdown {
                    seconds_remaining: remaining,
                },
            )
            .await;
        if !token.sleep(Duration::from_secs(1)).await {
            return cancel_quiz(&quiz_repo, &hub, quiz_id).await;
        }
    }

    // Past this point cancellation is no longer honored.
    if quiz_repo.set_status(quiz_id, QuizStatus::InProgress).await.is_err() {
        return;
    }
    let _ = quiz_start_tx.send(quiz_id).await;
}

async fn cancel_quiz(quiz_repo: &QuizRepository, hub: &Arc<Hub>, quiz_id: Uuid) {
    let _ = quiz_repo.set_status(quiz_id, QuizStatus::Cancelled).await;
    let _ = hub
        .broadcast_to_quiz(quiz_id, &ServerMessage::QuizCancelled { quiz_id })
        .await;
}

//! Integration coverage for the two places correctness depends on the
//! database rather than in-process logic: the per-question unique
//! constraint that makes answer submission safe under concurrency, and
//! the `RANK() OVER` query that decides winners and splits the prize.

mod common;

use quiz_engine::errors::AppError;
use quiz_engine::models::enums::EliminationReason;

#[tokio::test]
async fn duplicate_answer_is_rejected_by_the_unique_constraint() {
    let app = common::spawn_app().await;
    let factory = app.factory();

    let quiz_id = factory.create_quiz(5, 1000).await;
    let question_id = factory
        .create_pool_question(1, &["a", "b", "c"], 1)
        .await;
    let user_id = factory.create_user().await;

    let first = app
        .state
        .db
        .user_answer
        .insert(user_id, quiz_id, question_id, 1, true, 500, false, None, 1)
        .await;
    assert!(first.is_ok());

    let second = app
        .state
        .db
        .user_answer
        .insert(user_id, quiz_id, question_id, 0, false, 900, true, Some(EliminationReason::IncorrectAnswer), 0)
        .await;

    assert!(matches!(second, Err(AppError::DuplicateAnswer)));

    app.stop().await;
}

#[tokio::test]
async fn finalize_winners_ranks_by_score_and_splits_the_prize() {
    let app = common::spawn_app().await;
    let factory = app.factory();

    let quiz_id = factory.create_quiz(3, 900).await;

    let winner_a = factory.create_user().await;
    let winner_b = factory.create_user().await;
    let loser = factory.create_user().await;

    factory.insert_result(winner_a, quiz_id, 3, 3, 3).await;
    factory.insert_result(winner_b, quiz_id, 3, 3, 3).await;
    factory.insert_result(loser, quiz_id, 1, 1, 3).await;

    let winners = app
        .state
        .db
        .result
        .finalize_winners(quiz_id, 3, 900)
        .await
        .expect("finalize_winners should succeed");

    assert_eq!(winners.len(), 2);
    assert!(winners.contains(&winner_a));
    assert!(winners.contains(&winner_b));
    assert!(!winners.contains(&loser));

    let results = app
        .state
        .db
        .result
        .for_quiz(quiz_id)
        .await
        .expect("for_quiz should succeed");

    let winner_a_row = results.iter().find(|r| r.user_id == winner_a).unwrap();
    let winner_b_row = results.iter().find(|r| r.user_id == winner_b).unwrap();
    let loser_row = results.iter().find(|r| r.user_id == loser).unwrap();

    assert_eq!(winner_a_row.rank, Some(1));
    assert_eq!(winner_b_row.rank, Some(1));
    assert_eq!(loser_row.rank, Some(3));

    assert!(winner_a_row.is_winner);
    assert!(winner_b_row.is_winner);
    assert!(!loser_row.is_winner);

    assert_eq!(winner_a_row.prize_fund, 450);
    assert_eq!(winner_b_row.prize_fund, 450);
    assert_eq!(loser_row.prize_fund, 0);

    let users_after = app
        .state
        .db
        .user
        .find_by_id(winner_a)
        .await
        .expect("find_by_id should succeed");
    assert_eq!(users_after.wins_count, 1);
    assert_eq!(users_after.total_prize_won, 450);

    app.stop().await;
}

#[tokio::test]
async fn finalize_winners_with_no_qualifiers_splits_nothing() {
    let app = common::spawn_app().await;
    let factory = app.factory();

    let quiz_id = factory.create_quiz(3, 500).await;
    let user_id = factory.create_user().await;
    factory.insert_result(user_id, quiz_id, 1, 1, 3).await;

    let winners = app
        .state
        .db
        .result
        .finalize_winners(quiz_id, 3, 500)
        .await
        .expect("finalize_winners should succeed even with zero winners");

    assert!(winners.is_empty());

    app.stop().await;
}

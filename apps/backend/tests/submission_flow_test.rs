// Integration tests for the Turn Coordinator happy paths and failure
// modes: turn advancement, completion, notification addressing, and
// validation that never mutates state.

mod support;

use backend::db::txn::with_txn;
use backend::entities::games::GameStatus;
use backend::repos::{games, participants, sentences};
use backend::services::game_flow::{GameFlowService, SubmissionResult};
use backend::{AppError, ErrorCode};

use support::factory::{create_story_game, three_writers};

#[tokio::test]
async fn full_three_writer_game_runs_to_completion() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b, c) = three_writers("flow");

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(create_story_game(txn, "Night Shift", Some("The shift began at nine."), &[&a, &b, &c])
                .await?)
        })
    })
    .await?;

    let game_id = created.game.id;
    let [p1, p2, p3] = [
        created.participants[0].clone(),
        created.participants[1].clone(),
        created.participants[2].clone(),
    ];

    let service = GameFlowService::from_state(&app.state);

    // Turn 1
    let result = service
        .submit(None, &app.state, game_id, p1.id, "Ann unlocked the office.")
        .await?;
    match &result {
        SubmissionResult::Recorded {
            sentence,
            game_completed,
        } => {
            assert_eq!(sentence.turn_number, 1);
            assert!(!game_completed);
        }
        other => panic!("expected Recorded, got {other:?}"),
    }

    let game = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(games::require_game(txn, game_id).await?) })
    })
    .await?;
    assert_eq!(game.current_turn, 2);
    assert_eq!(game.status, GameStatus::Active);

    // One turn notification so far, addressed to the participant whose
    // turn_order equals the NEW current_turn, carrying the submitted text.
    let turns = app.dispatcher.turn_notifications();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].next_participant_id, p2.id);
    assert_eq!(turns[0].next_participant_email, p2.email);
    assert_eq!(turns[0].previous_sentence, "Ann unlocked the office.");
    assert_eq!(turns[0].turn_number, 2);
    assert_eq!(turns[0].max_participants, 3);

    // Turn 2
    service
        .submit(None, &app.state, game_id, p2.id, "Bob's line")
        .await?;

    let game = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(games::require_game(txn, game_id).await?) })
    })
    .await?;
    assert_eq!(game.current_turn, 3);

    let turns = app.dispatcher.turn_notifications();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].next_participant_id, p3.id);
    assert_eq!(turns[1].previous_sentence, "Bob's line");

    // Final turn
    let result = service
        .submit(None, &app.state, game_id, p3.id, "And then it ended.")
        .await?;
    match &result {
        SubmissionResult::Recorded {
            sentence,
            game_completed,
        } => {
            assert_eq!(sentence.turn_number, 3);
            assert!(*game_completed);
        }
        other => panic!("expected Recorded, got {other:?}"),
    }

    let game = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(games::require_game(txn, game_id).await?) })
    })
    .await?;
    assert_eq!(game.status, GameStatus::Completed);
    // current_turn keeps its terminal value
    assert_eq!(game.current_turn, 3);
    assert!(game.completed_at.is_some());

    // Exactly one story-complete dispatch, no third turn notification.
    assert_eq!(app.dispatcher.turn_notifications().len(), 2);
    let completes = app.dispatcher.story_completes();
    assert_eq!(completes.len(), 1);
    let complete = &completes[0];
    assert_eq!(complete.recipients.len(), 3);
    assert!(complete.recipients.contains(&p1.email));
    assert!(complete.recipients.contains(&p3.email));

    // Sentences arrive ordered by turn, opener included.
    let turn_numbers: Vec<i16> = complete.sentences.iter().map(|s| s.turn_number).collect();
    assert_eq!(turn_numbers, vec![0, 1, 2, 3]);
    assert_eq!(complete.sentences[2].body, "Bob's line");

    // Contributed turn numbers form exactly {1..N}; everyone is marked done.
    with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            let stored = sentences::list_by_game(txn, game_id).await?;
            let contributed: Vec<i16> = stored
                .iter()
                .map(|s| s.turn_number)
                .filter(|t| *t > 0)
                .collect();
            assert_eq!(contributed, vec![1, 2, 3]);

            let everyone = participants::list_by_game(txn, game_id).await?;
            assert!(everyone.iter().all(|p| p.has_completed));
            Ok(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn out_of_turn_submission_fails_and_mutates_nothing() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b, c) = three_writers("ooturn");

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(create_story_game(txn, "Too Eager", Some("Open."), &[&a, &b, &c]).await?)
        })
    })
    .await?;

    let game_id = created.game.id;
    let second = created.participants[1].clone();

    let service = GameFlowService::from_state(&app.state);
    let err = service
        .submit(None, &app.state, game_id, second.id, "Me first!")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfTurn);

    with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            let game = games::require_game(txn, game_id).await?;
            assert_eq!(game.current_turn, 1);
            assert_eq!(game.status, GameStatus::Active);

            // Only the opener exists.
            let stored = sentences::list_by_game(txn, game_id).await?;
            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].turn_number, 0);

            let second_again = participants::require_in_game(txn, game_id, second.id).await?;
            assert!(!second_again.has_completed);
            Ok(())
        })
    })
    .await?;

    assert!(app.dispatcher.events().is_empty());

    Ok(())
}

#[tokio::test]
async fn invalid_sentences_are_rejected_before_any_write() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b, c) = three_writers("invalid");

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(create_story_game(txn, "Invalid", None, &[&a, &b, &c]).await?) })
    })
    .await?;

    let game_id = created.game.id;
    let first = created.participants[0].id;
    let service = GameFlowService::from_state(&app.state);

    let err = service
        .submit(None, &app.state, game_id, first, "   ")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptySentence);

    let too_long = "x".repeat(201);
    let err = service
        .submit(None, &app.state, game_id, first, &too_long)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SentenceTooLong);

    with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            assert!(sentences::list_by_game(txn, game_id).await?.is_empty());
            let game = games::require_game(txn, game_id).await?;
            assert_eq!(game.current_turn, 1);
            Ok(())
        })
    })
    .await?;
    assert!(app.dispatcher.events().is_empty());

    Ok(())
}

#[tokio::test]
async fn submissions_to_a_completed_game_are_rejected() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b) = (
        backend_test_support::unique_helpers::unique_email("closed-a"),
        backend_test_support::unique_helpers::unique_email("closed-b"),
    );

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(create_story_game(txn, "Closed", None, &[&a, &b]).await?) })
    })
    .await?;

    let game_id = created.game.id;
    let first = created.participants[0].id;
    let second = created.participants[1].id;

    let service = GameFlowService::from_state(&app.state);
    service
        .submit(None, &app.state, game_id, first, "One.")
        .await?;
    service
        .submit(None, &app.state, game_id, second, "Two.")
        .await?;

    let err = service
        .submit(None, &app.state, game_id, first, "Encore!")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameCompleted);

    Ok(())
}

#[tokio::test]
async fn unknown_ids_fail_with_not_found() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b, c) = three_writers("nf");

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(create_story_game(txn, "NF", None, &[&a, &b, &c]).await?) })
    })
    .await?;

    let game_id = created.game.id;
    let first = created.participants[0].id;
    let service = GameFlowService::from_state(&app.state);

    let err = service
        .submit(None, &app.state, game_id + 999, first, "Hello.")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);

    let err = service
        .submit(None, &app.state, game_id, first + 999, "Hello.")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ParticipantNotFound);

    Ok(())
}

#[tokio::test]
async fn dispatch_failure_never_fails_the_submission() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b, c) = three_writers("flaky");

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(create_story_game(txn, "Flaky Mail", None, &[&a, &b, &c]).await?) })
    })
    .await?;

    let game_id = created.game.id;
    let first = created.participants[0].id;

    // Coordinator wired to a dispatcher whose sends always fail.
    let failing = std::sync::Arc::new(support::dispatcher::RecordingDispatcher::failing());
    let service = GameFlowService::new(failing.clone());

    let result = service
        .submit(None, &app.state, game_id, first, "Still counts.")
        .await?;
    assert!(matches!(result, SubmissionResult::Recorded { .. }));

    // The turn advanced despite the failed dispatch attempt.
    let game = with_txn(None, &app.state, |txn| {
        Box::pin(async move { Ok(games::require_game(txn, game_id).await?) })
    })
    .await?;
    assert_eq!(game.current_turn, 2);
    assert_eq!(failing.events().len(), 1);

    Ok(())
}

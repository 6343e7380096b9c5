// Integration tests for game creation: atomic aggregate, turn-order
// assignment, email normalization and validation bounds.

mod support;

use backend::db::txn::with_txn;
use backend::entities::games::GameStatus;
use backend::errors::domain::{DomainError, ValidationKind};
use backend::repos::{participants, sentences};
use backend::services::games::{GameCreateRequest, GameService};
use backend::AppError;
use backend_test_support::unique_helpers::unique_email;

use support::factory::{create_story_game, three_writers};

#[tokio::test]
async fn create_game_builds_the_full_aggregate() -> Result<(), AppError> {
    let app = support::build_test_app().await?;
    let (a, b, c) = three_writers("create");

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(create_story_game(
                txn,
                "The Lighthouse",
                Some("The lamp went dark at dusk."),
                &[&a, &b, &c],
            )
            .await?)
        })
    })
    .await?;

    let game = &created.game;
    assert_eq!(game.title.as_deref(), Some("The Lighthouse"));
    assert_eq!(game.status, GameStatus::Active);
    assert_eq!(game.current_turn, 1);
    assert_eq!(game.max_participants, 3);
    assert_eq!(game.share_code.len(), 10);
    assert!(game.completed_at.is_none());

    let turn_orders: Vec<i16> = created.participants.iter().map(|p| p.turn_order).collect();
    assert_eq!(turn_orders, vec![1, 2, 3]);
    assert!(created.participants.iter().all(|p| !p.has_completed));
    assert_eq!(game.host_email, created.participants[0].email);

    // Opening sentence occupies turn 0, authored by the host.
    let game_id = game.id;
    let host_email = game.host_email.clone();
    with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            let opening = sentences::find_for_turn(txn, game_id, 0)
                .await?
                .expect("opening sentence should exist");
            assert_eq!(opening.body, "The lamp went dark at dusk.");
            assert_eq!(opening.author_email, host_email);

            let listed = sentences::list_by_game(txn, game_id).await?;
            assert_eq!(listed.len(), 1);

            let listed_participants = participants::list_by_game(txn, game_id).await?;
            assert_eq!(listed_participants.len(), 3);
            Ok(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn create_game_normalizes_emails_case_insensitively() -> Result<(), AppError> {
    let app = support::build_test_app().await?;

    let created = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(create_story_game(
                txn,
                "Case Test",
                None,
                &["  Alice@Example.COM ", "bob@example.com"],
            )
            .await?)
        })
    })
    .await?;

    assert_eq!(created.participants[0].email, "alice@example.com");
    assert_eq!(created.game.host_email, "alice@example.com");

    Ok(())
}

#[tokio::test]
async fn create_game_rejects_bad_participant_counts() -> Result<(), AppError> {
    let app = support::build_test_app().await?;

    let one = vec![unique_email("solo")];
    let eleven: Vec<String> = (0..11).map(|i| unique_email(&format!("p{i}"))).collect();

    for emails in [one, eleven] {
        let result = with_txn(None, &app.state, |txn| {
            Box::pin(async move {
                let service = GameService::new();
                Ok(service
                    .create_game(
                        txn,
                        GameCreateRequest {
                            title: None,
                            opening_sentence: None,
                            participant_emails: emails,
                        },
                    )
                    .await)
            })
        })
        .await?;

        match result {
            Err(DomainError::Validation(ValidationKind::InvalidParticipantCount, _)) => {}
            other => panic!("expected InvalidParticipantCount, got {other:?}"),
        }
    }

    Ok(())
}

#[tokio::test]
async fn create_game_rejects_duplicate_emails_differing_only_by_case() -> Result<(), AppError> {
    let app = support::build_test_app().await?;

    let result = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(
                create_story_game(txn, "Dup", None, &["same@example.com", "SAME@example.com"])
                    .await,
            )
        })
    })
    .await?;

    match result {
        Err(DomainError::Validation(ValidationKind::DuplicateParticipantEmail, _)) => {}
        other => panic!("expected DuplicateParticipantEmail, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn create_game_rejects_invalid_email_and_overlong_opening() -> Result<(), AppError> {
    let app = support::build_test_app().await?;

    let result = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(create_story_game(txn, "Bad Email", None, &["not-an-email", "ok@example.com"]).await)
        })
    })
    .await?;
    match result {
        Err(DomainError::Validation(ValidationKind::InvalidEmail, _)) => {}
        other => panic!("expected InvalidEmail, got {other:?}"),
    }

    let opening = "x".repeat(201);
    let result = with_txn(None, &app.state, |txn| {
        Box::pin(async move {
            Ok(create_story_game(
                txn,
                "Long Opening",
                Some(&opening),
                &["a@example.com", "b@example.com"],
            )
            .await)
        })
    })
    .await?;
    match result {
        Err(DomainError::Validation(ValidationKind::SentenceTooLong, _)) => {}
        other => panic!("expected SentenceTooLong, got {other:?}"),
    }

    Ok(())
}

//! Game-related HTTP routes: creation, participant views, sentence
//! submission and the story read.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::entities::games::GameStatus;
use crate::error::AppError;
use crate::repos::sentences::Sentence;
use crate::services::game_flow::{GameFlowService, SubmissionResult};
use crate::services::games::{GameCreateRequest, GameService};
use crate::services::participant_view::{resolve_view, ParticipantView};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct SentenceResponse {
    id: i64,
    turn_number: i16,
    author_email: String,
    body: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: time::OffsetDateTime,
}

impl From<Sentence> for SentenceResponse {
    fn from(s: Sentence) -> Self {
        Self {
            id: s.id,
            turn_number: s.turn_number,
            author_email: s.author_email,
            body: s.body,
            created_at: s.created_at,
        }
    }
}

fn status_str(status: &GameStatus) -> &'static str {
    match status {
        GameStatus::Active => "active",
        GameStatus::Completed => "completed",
    }
}

// ---------------------------------------------------------------------------
// POST /api/games
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    title: Option<String>,
    opening_sentence: Option<String>,
    /// Emails in turn order; the first entry is the host.
    participant_emails: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ParticipantResponse {
    id: i64,
    email: String,
    turn_order: i16,
}

#[derive(Debug, Serialize)]
struct CreateGameResponse {
    game_id: i64,
    share_code: String,
    current_turn: i16,
    participants: Vec<ParticipantResponse>,
}

async fn create_game(
    http_req: HttpRequest,
    body: web::Json<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = GameCreateRequest {
        title: body.title.clone(),
        opening_sentence: body.opening_sentence.clone(),
        participant_emails: body.participant_emails.clone(),
    };

    let created = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameService::new();
            Ok(service.create_game(txn, request).await?)
        })
    })
    .await?;

    let response = CreateGameResponse {
        game_id: created.game.id,
        share_code: created.game.share_code.clone(),
        current_turn: created.game.current_turn,
        participants: created
            .participants
            .into_iter()
            .map(|p| ParticipantResponse {
                id: p.id,
                email: p.email,
                turn_order: p.turn_order,
            })
            .collect(),
    };

    Ok(HttpResponse::Created().json(response))
}

// ---------------------------------------------------------------------------
// GET /api/games/{game_id}/participants/{participant_id}/view
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum ViewResponse {
    AlreadySubmitted { sentence: SentenceResponse },
    WaitingForTurn { current_turn: i16 },
    ReadyToWrite { previous: Option<SentenceResponse> },
}

async fn get_view(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<ViewResponse>, AppError> {
    let (game_id, participant_id) = path.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(resolve_view(txn, game_id, participant_id).await?) })
    })
    .await?;

    let response = match view {
        ParticipantView::AlreadySubmitted { sentence } => ViewResponse::AlreadySubmitted {
            sentence: sentence.into(),
        },
        ParticipantView::WaitingForTurn { current_turn } => {
            ViewResponse::WaitingForTurn { current_turn }
        }
        ParticipantView::ReadyToWrite { previous } => ViewResponse::ReadyToWrite {
            previous: previous.map(SentenceResponse::from),
        },
    };

    Ok(web::Json(response))
}

// ---------------------------------------------------------------------------
// POST /api/games/{game_id}/participants/{participant_id}/sentences
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SubmitSentenceRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct SubmitSentenceResponse {
    /// "recorded" for a first-time insert, "already_submitted" when the turn
    /// already held a sentence (idempotent success).
    status: &'static str,
    sentence: SentenceResponse,
    game_completed: bool,
}

async fn submit_sentence(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    body: web::Json<SubmitSentenceRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SubmitSentenceResponse>, AppError> {
    let (game_id, participant_id) = path.into_inner();

    let service = GameFlowService::from_state(&app_state);
    let result = service
        .submit(
            Some(&http_req),
            &app_state,
            game_id,
            participant_id,
            &body.text,
        )
        .await?;

    let response = match result {
        SubmissionResult::Recorded {
            sentence,
            game_completed,
        } => SubmitSentenceResponse {
            status: "recorded",
            sentence: sentence.into(),
            game_completed,
        },
        SubmissionResult::AlreadySubmitted { sentence } => SubmitSentenceResponse {
            status: "already_submitted",
            sentence: sentence.into(),
            game_completed: false,
        },
    };

    Ok(web::Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/games/{game_id}/story
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct StoryResponse {
    game_id: i64,
    title: Option<String>,
    status: &'static str,
    sentences: Vec<SentenceResponse>,
}

async fn get_story(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<StoryResponse>, AppError> {
    let game_id = path.into_inner();

    let story = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameService::new();
            Ok(service.fetch_story(txn, game_id).await?)
        })
    })
    .await?;

    Ok(web::Json(StoryResponse {
        game_id: story.game.id,
        title: story.game.title.clone(),
        status: status_str(&story.game.status),
        sentences: story.sentences.into_iter().map(Into::into).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(
        web::resource("/{game_id}/participants/{participant_id}/view")
            .route(web::get().to(get_view)),
    );
    cfg.service(
        web::resource("/{game_id}/participants/{participant_id}/sentences")
            .route(web::post().to(submit_sentence)),
    );
    cfg.service(web::resource("/{game_id}/story").route(web::get().to(get_story)));
}

// End-to-end tests through the HTTP surface: create a game, read views,
// submit sentences, fetch the story, and check the problem+json error shape.

mod support;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::routes;
use serde_json::{json, Value};

#[actix_web::test]
async fn game_plays_end_to_end_over_http() {
    let app = support::build_test_app().await.expect("test app");

    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state.clone()))
            .configure(routes::configure),
    )
    .await;

    // Create a game
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({
            "title": "Wire Story",
            "opening_sentence": "It started with a dial tone.",
            "participant_emails": [
                "host@example.test",
                "second@example.test",
            ],
        }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    let game_id = created["game_id"].as_i64().unwrap();
    assert_eq!(created["current_turn"], 1);
    let participants = created["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    let first_id = participants[0]["id"].as_i64().unwrap();
    let second_id = participants[1]["id"].as_i64().unwrap();

    // First writer is ready, seeing the opener
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/games/{game_id}/participants/{first_id}/view"
        ))
        .to_request();
    let view: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(view["state"], "ready_to_write");
    assert_eq!(view["previous"]["body"], "It started with a dial tone.");

    // Second writer waits
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/games/{game_id}/participants/{second_id}/view"
        ))
        .to_request();
    let view: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(view["state"], "waiting_for_turn");
    assert_eq!(view["current_turn"], 1);

    // First writer submits
    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/games/{game_id}/participants/{first_id}/sentences"
        ))
        .set_json(json!({ "text": "Nobody answered." }))
        .to_request();
    let submitted: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(submitted["status"], "recorded");
    assert_eq!(submitted["game_completed"], false);
    assert_eq!(submitted["sentence"]["turn_number"], 1);

    // Second writer finishes the game
    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/games/{game_id}/participants/{second_id}/sentences"
        ))
        .set_json(json!({ "text": "So she hung up." }))
        .to_request();
    let submitted: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(submitted["status"], "recorded");
    assert_eq!(submitted["game_completed"], true);

    // Story is complete and ordered
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/story"))
        .to_request();
    let story: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(story["status"], "completed");
    let bodies: Vec<&str> = story["sentences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["body"].as_str().unwrap())
        .collect();
    assert_eq!(
        bodies,
        vec![
            "It started with a dial tone.",
            "Nobody answered.",
            "So she hung up.",
        ]
    );

    // Both notifications went out: one turn hand-off, one story complete.
    assert_eq!(app.dispatcher.turn_notifications().len(), 1);
    assert_eq!(app.dispatcher.story_completes().len(), 1);
}

#[actix_web::test]
async fn invalid_submission_returns_problem_json() {
    let app = support::build_test_app().await.expect("test app");

    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state.clone()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({
            "participant_emails": ["a@example.test", "b@example.test"],
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&service, req).await;
    let game_id = created["game_id"].as_i64().unwrap();
    let first_id = created["participants"][0]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/games/{game_id}/participants/{first_id}/sentences"
        ))
        .set_json(json!({ "text": "   " }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"], "EMPTY_SENTENCE");
    assert_eq!(problem["status"], 400);

    // An unknown game id maps to the not-found problem shape.
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/story", game_id + 999))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"], "GAME_NOT_FOUND");
}

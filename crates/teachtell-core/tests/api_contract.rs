//! Backend contract tests
//!
//! Each test runs the client against a `wiremock` server standing in for the
//! Teach & Tell backend.
//!
//! ## What These Tests Verify
//!
//! - Login persists the token and normalized participant code
//! - Error payloads (`detail` / `error` / `message`) reach the user
//! - Session restore clears storage only when the token is rejected
//! - A 401 from the explanation endpoint is retried exactly once
//! - Game responses are mapped into chat and clue messages
//! - A language change swaps the story introduction in the chat log

use serde_json::json;
use tempfile::TempDir;
use teachtell_core::game::{ChatLog, GameSession};
use teachtell_core::{ApiClient, ClientError, Displayed, Explainer, SessionManager, Storage};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, TempDir, SessionManager) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path().join("store.redb")).unwrap();
    let api = ApiClient::new(&server.uri()).unwrap();
    (server, dir, SessionManager::new(api, storage))
}

#[tokio::test]
async fn test_login_persists_session() {
    let (server, _dir, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"participant_code": "ABC123"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "tok-1", "participant_code": "abc123"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = auth.login("  abc123 ").await.unwrap();
    assert_eq!(session.token, "tok-1");
    assert_eq!(session.participant_code, "ABC123");

    assert_eq!(auth.token().unwrap().as_deref(), Some("tok-1"));
    assert_eq!(auth.participant_code().unwrap().as_deref(), Some("ABC123"));
}

#[tokio::test]
async fn test_empty_code_never_hits_backend() {
    let (server, _dir, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = auth.login("   ").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyParticipantCode));
    assert_eq!(err.to_string(), "Enter your participant code.");
}

#[tokio::test]
async fn test_login_error_detail() {
    let (server, _dir, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"detail": "Unknown participant code"})),
        )
        .mount(&server)
        .await;

    let err = auth.login("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown participant code");
    assert_eq!(auth.token().unwrap(), None);
}

#[tokio::test]
async fn test_login_error_fallbacks() {
    let (server, _dir, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = auth.login("abc").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Sign-in failed. Please check your participant code."
    );
}

#[tokio::test]
async fn test_login_without_token() {
    let (server, _dir, auth) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"participant_code": "ABC"})))
        .mount(&server)
        .await;

    let err = auth.login("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::MissingToken(_)));
}

#[tokio::test]
async fn test_restore_valid_session() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("tok-1", "OLD").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"participant_code": "new1"})))
        .mount(&server)
        .await;

    let session = auth.restore_session().await.unwrap().unwrap();
    assert_eq!(session.participant_code, "NEW1");
    assert_eq!(auth.participant_code().unwrap().as_deref(), Some("NEW1"));
}

#[tokio::test]
async fn test_restore_rejected_session_clears_storage() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("stale", "ABC").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;

    assert_eq!(auth.restore_session().await.unwrap(), None);
    assert_eq!(auth.token().unwrap(), None);
    assert_eq!(auth.participant_code().unwrap(), None);
}

#[tokio::test]
async fn test_restore_without_token_skips_request() {
    let (server, _dir, auth) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert_eq!(auth.restore_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_explain_retries_once_after_401() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("stale", "ABC123").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/game/explain"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"participant_code": "ABC123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/game/explain"))
        .and(header("authorization", "Bearer fresh"))
        .and(body_json(json!({
            "action": "word",
            "word": "alibi",
            "original_text": "He had an alibi."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"type": "language_tutor", "content": "Tutor:\nProof you were elsewhere."}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let explainer = Explainer::new(auth.clone());
    let explanation = explainer
        .explain("alibi", "He had   an\nalibi.")
        .await
        .unwrap();
    assert_eq!(explanation.body, "Proof you were elsewhere.");
    assert!(!explanation.cached);
    assert_eq!(auth.token().unwrap().as_deref(), Some("fresh"));

    // second lookup is served from the cache
    let cached = explainer.explain("Alibi", "He had an alibi.").await.unwrap();
    assert!(cached.cached);
    assert_eq!(cached.body, "Proof you were elsewhere.");
}

#[tokio::test]
async fn test_explain_gives_up_after_second_401() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("stale", "ABC123").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/game/explain"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = Explainer::new(auth).explain("alibi", "").await.unwrap_err();
    match err {
        ClientError::ExplainFailed { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Not authenticated");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_explain_without_code_is_missing_token() {
    let (_server, _dir, auth) = setup().await;

    let err = Explainer::new(auth).explain("alibi", "").await.unwrap_err();
    assert!(matches!(err, ClientError::MissingToken(_)));
    assert!(err.needs_login());
}

#[tokio::test]
async fn test_game_start_and_actions() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("tok", "ABC123").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/game/start"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"type": "system", "content": "It was a cold night.", "typewriter_style": true},
                {"type": "clue", "clue_id": 1, "content": "A torn note."}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/game/action"))
        .and(body_json(json!({"action": "start_investigation"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"type": "system", "content": "👥 FOUR PEOPLE ARE IN THE APARTMENT"}]
        })))
        .mount(&server)
        .await;

    let game = GameSession::new(auth);
    let start = game.start().await.unwrap();
    assert_eq!(start.len(), 2);
    assert!(matches!(&start[0], Displayed::Chat(m) if m.sender == "***"));
    assert!(matches!(&start[1], Displayed::Clue { clue_id, .. } if clue_id == "1"));

    let outcome = game.action("start_investigation").await.unwrap();
    assert!(outcome.show_tutorial);
    assert!(!outcome.replaces_intro);
    assert!(matches!(&outcome.messages[0], Displayed::Chat(m) if m.unlocks_input()));

    game.complete_tutorial().unwrap();
    let again = game.action("start_investigation").await.unwrap();
    assert!(!again.show_tutorial);
}

#[tokio::test]
async fn test_language_change_swaps_intro_in_chat() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("tok", "ABC123").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/game/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"type": "system", "content": "The evening was long and complicated.", "typewriter_style": true},
                {"content": "Too hard?", "buttons": [{"text": "Easier", "action": "language_adjust_easier"}]}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/game/action"))
        .and(body_json(json!({"action": "language_adjust_easier"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"type": "system", "content": "The night was long.", "typewriter_style": true}]
        })))
        .mount(&server)
        .await;

    let game = GameSession::new(auth);
    let mut log = ChatLog::new();
    log.push_all(game.start().await.unwrap(), false);

    let outcome = game.action("language_adjust_easier").await.unwrap();
    assert!(outcome.replaces_intro);
    let update = log.push_all(outcome.messages, outcome.replaces_intro);
    assert!(update.removed_intro);

    let contents: Vec<&str> = log.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Too hard?", "The night was long."]);
    assert_eq!(log.messages().iter().filter(|m| m.typewriter).count(), 1);
}

#[tokio::test]
async fn test_game_errors_carry_backend_detail() {
    let (server, _dir, auth) = setup().await;
    auth.storage().save_session("tok", "ABC123").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/game/message"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Game not started"})))
        .mount(&server)
        .await;

    let game = GameSession::new(auth);
    let err = game.send_message("Where were you?").await.unwrap_err();
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Game not started");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // blank messages are not sent
    assert!(game.send_message("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_server() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path().join("store.redb")).unwrap();
    // nothing listens on port 9 locally
    let api = ApiClient::new("http://127.0.0.1:9").unwrap();
    let auth = SessionManager::new(api, storage);

    let err = auth.login("abc").await.unwrap_err();
    assert!(err.is_unreachable());
}

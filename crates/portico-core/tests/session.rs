//! Login protocol and session state tests.

mod common;

use std::sync::Arc;

use portico_core::error::TransportError;
use portico_core::{ClientProvider, Error, LoginOutcome, SessionManager, SessionState};

use common::{Reply, Script};

const API: &str = "https://api.example.com";
const OTHER: &str = "https://other.example.com";

fn setup(script: &Script) -> (Arc<ClientProvider<Script>>, Arc<SessionManager<Script>>) {
    let provider = Arc::new(ClientProvider::new(script.clone()));
    let sessions = Arc::new(SessionManager::new(Arc::clone(&provider)));
    (provider, sessions)
}

#[tokio::test]
async fn login_without_client_is_no_client() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123"));
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);

    let result = sessions.login("a@b.com", "x").await;

    assert!(matches!(result, Err(Error::NoClient)));
    assert!(script.calls().is_empty());
    assert_eq!(script.created(), 0);
    assert_eq!(sessions.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn rejected_credentials_leave_session_unauthenticated() {
    let script = Script::new();
    script.reply(API, Reply::Reject);
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let outcome = sessions.login("a@b.com", "x").await.unwrap();

    assert_eq!(outcome, LoginOutcome::Failure);
    assert_eq!(sessions.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn accepted_credentials_authenticate_session() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123"));
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let outcome = sessions.login("a@b.com", "correct").await.unwrap();

    let LoginOutcome::Success(identity) = outcome else {
        panic!("expected success");
    };
    assert_eq!(identity.subject(), "u123");
    assert_eq!(identity.token().unwrap().as_str(), "token-u123");

    let state = sessions.session_state();
    assert!(state.is_authenticated());
    assert_eq!(state.identity().unwrap().subject(), "u123");
}

#[tokio::test]
async fn transport_error_leaves_state_unchanged() {
    let script = Script::new();
    script.reply(API, Reply::Unreachable);
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let result = sessions.login("a@b.com", "x").await;

    assert!(matches!(
        result,
        Err(Error::Transport(TransportError::Connection { .. }))
    ));
    assert_eq!(sessions.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn transport_error_after_success_keeps_authenticated_identity() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123"));
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();
    sessions.login("a@b.com", "x").await.unwrap();

    script.reply(API, Reply::Unreachable);
    let result = sessions.login("a@b.com", "x").await;

    assert!(result.unwrap_err().is_transport());
    assert_eq!(
        sessions.session_state().identity().unwrap().subject(),
        "u123"
    );
}

#[tokio::test]
async fn set_endpoint_without_create_keeps_old_target() {
    let script = Script::new();
    script.reply(API, Reply::Reject).reply(OTHER, Reply::Accept("u999"));
    let (provider, sessions) = setup(&script);

    provider.set_endpoint(API);
    provider.create_client();
    provider.set_endpoint(OTHER);

    assert_eq!(provider.current_client().unwrap().endpoint().as_str(), API);

    let outcome = sessions.login("a@b.com", "x").await.unwrap();
    assert_eq!(outcome, LoginOutcome::Failure);
    assert_eq!(script.calls(), vec![API.to_string()]);

    provider.create_client();
    let outcome = sessions.login("a@b.com", "x").await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(script.calls(), vec![API.to_string(), OTHER.to_string()]);
}

#[tokio::test]
async fn malformed_endpoint_is_accepted_until_first_request() {
    let script = Script::new();
    let (provider, sessions) = setup(&script);

    provider.set_endpoint("not a url at all");
    let handle = provider.create_client();
    assert_eq!(handle.endpoint().as_str(), "not a url at all");

    let result = sessions.login("a@b.com", "x").await;
    assert!(result.unwrap_err().is_transport());
}

#[tokio::test]
async fn stale_success_does_not_authenticate() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123"));
    let gate = script.gate(API);
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let pending = tokio::spawn({
        let sessions = Arc::clone(&sessions);
        async move { sessions.login("a@b.com", "x").await }
    });
    script.wait_for_calls(1).await;

    provider.create_client();
    gate.notify_one();

    let outcome = pending.await.unwrap().unwrap();
    assert_eq!(outcome, LoginOutcome::Superseded);
    assert_eq!(sessions.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn stale_transport_error_is_discarded() {
    let script = Script::new();
    script.reply(API, Reply::Unreachable);
    let gate = script.gate(API);
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let pending = tokio::spawn({
        let sessions = Arc::clone(&sessions);
        async move { sessions.login("a@b.com", "x").await }
    });
    script.wait_for_calls(1).await;

    provider.set_endpoint(OTHER);
    provider.create_client();
    gate.notify_one();

    assert_eq!(pending.await.unwrap().unwrap(), LoginOutcome::Superseded);
}

#[tokio::test]
async fn in_flight_login_keeps_captured_client() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123")).reply(OTHER, Reply::Accept("u999"));
    let gate = script.gate(API);
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let stale = tokio::spawn({
        let sessions = Arc::clone(&sessions);
        async move { sessions.login("a@b.com", "x").await }
    });
    script.wait_for_calls(1).await;

    provider.set_endpoint(OTHER);
    provider.create_client();
    let fresh = sessions.login("a@b.com", "x").await.unwrap();
    assert_eq!(fresh.clone().into_result().unwrap().unwrap().subject(), "u999");

    gate.notify_one();
    assert_eq!(stale.await.unwrap().unwrap(), LoginOutcome::Superseded);

    assert_eq!(script.calls(), vec![API.to_string(), OTHER.to_string()]);
    assert_eq!(
        sessions.session_state().identity().unwrap().subject(),
        "u999"
    );
}

#[tokio::test]
async fn later_rejection_on_current_client_clears_session() {
    let script = Script::new();
    script.reply(
        API,
        Reply::AcceptOnly {
            identifier: "a@b.com",
            secret: "correct",
            subject: "u123",
        },
    );
    let gate = script.gate(API);
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let first = tokio::spawn({
        let sessions = Arc::clone(&sessions);
        async move { sessions.login("a@b.com", "correct").await }
    });
    script.wait_for_calls(1).await;
    gate.notify_one();
    assert!(first.await.unwrap().unwrap().is_success());

    let second = tokio::spawn({
        let sessions = Arc::clone(&sessions);
        async move { sessions.login("a@b.com", "wrong").await }
    });
    script.wait_for_calls(2).await;
    gate.notify_one();
    assert_eq!(second.await.unwrap().unwrap(), LoginOutcome::Failure);

    assert_eq!(sessions.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn subscribers_observe_authentication() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123"));
    let (provider, sessions) = setup(&script);
    let mut rx = sessions.subscribe();
    provider.set_endpoint(API);
    provider.create_client();

    sessions.login("a@b.com", "x").await.unwrap();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().identity().unwrap().subject(), "u123");
}

#[tokio::test]
async fn rejection_does_not_notify_when_already_unauthenticated() {
    let script = Script::new();
    script.reply(API, Reply::Reject);
    let (provider, sessions) = setup(&script);
    let rx = sessions.subscribe();
    provider.set_endpoint(API);
    provider.create_client();

    sessions.login("a@b.com", "x").await.unwrap();

    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn state_readers_and_client_swaps_do_not_block_logins() {
    let script = Script::new();
    script.reply(API, Reply::Accept("u123"));
    let (provider, sessions) = setup(&script);
    provider.set_endpoint(API);
    provider.create_client();

    let logins = tokio::spawn({
        let sessions = Arc::clone(&sessions);
        async move {
            for _ in 0..500 {
                let _ = sessions.login("a@b.com", "x").await;
            }
        }
    });

    let swaps = tokio::task::spawn_blocking({
        let provider = Arc::clone(&provider);
        let rx = sessions.subscribe();
        move || {
            for _ in 0..500 {
                // Clone out of the borrow before touching the provider.
                let _state = rx.borrow().clone();
                provider.create_client();
            }
        }
    });

    tokio::time::timeout(std::time::Duration::from_secs(10), async {
        logins.await.unwrap();
        swaps.await.unwrap();
    })
    .await
    .expect("logins and client swaps should both finish");

    let current = provider.current_client().unwrap();
    assert_eq!(current.endpoint().as_str(), API);
}

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedClient;
use pretty_assertions::assert_eq;
use rag_client::{
    ApiRequest, ApiResponse, ClientCommand, ClientEvent, ClientHandle, ClientStopped,
    RequestClient, RequestError,
};
use rag_core::{FailureKind, UploadPhase};

const WAIT: Duration = Duration::from_secs(5);

fn next(handle: &ClientHandle) -> ClientEvent {
    handle
        .recv_timeout(WAIT)
        .expect("client thread alive")
        .expect("event before timeout")
}

#[test]
fn upload_reports_every_step_until_settled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("alice.pdf");
    let second = dir.path().join("bob.zip");
    std::fs::write(&first, b"%PDF-1.4 alice").expect("write");
    std::fs::write(&second, b"PK zip").expect("write");

    let client = Arc::new(ScriptedClient::succeeding());
    let handle = ClientHandle::with_client(client.clone());
    handle.submit(ClientCommand::Upload {
        paths: vec![first, second],
    });

    let mut processed = Vec::new();
    loop {
        match next(&handle) {
            ClientEvent::UploadStatus(status) => {
                processed.push(status.processed_count);
                if status.is_settled() {
                    assert_eq!(status.phase, UploadPhase::Succeeded);
                    break;
                }
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(processed, vec![0, 1, 2]);
    assert_eq!(client.uploaded_names(), vec!["alice.pdf", "bob.zip"]);
}

#[test]
fn unreadable_file_rejects_the_batch_before_any_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let present = dir.path().join("alice.pdf");
    std::fs::write(&present, b"%PDF").expect("write");
    let missing = dir.path().join("ghost.pdf");

    let client = Arc::new(ScriptedClient::succeeding());
    let handle = ClientHandle::with_client(client.clone());
    handle.submit(ClientCommand::Upload {
        paths: vec![present, missing],
    });

    match next(&handle) {
        ClientEvent::UploadStatus(status) => {
            assert_eq!(status.phase, UploadPhase::Failed);
            assert_eq!(
                status.failure.map(|failure| failure.kind),
                Some(FailureKind::Validation)
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(client.call_count(), 0);
}

#[test]
fn commands_are_answered_in_submission_order() {
    let client = Arc::new(ScriptedClient::succeeding().with_body(
        r#"{"results":[{"score":0.5,"source":"a.pdf","snippet":"rust"}],"job_id":3,"description":"Rust dev"}"#,
    ));
    let handle = ClientHandle::with_client(client.clone());

    handle.submit(ClientCommand::Ask {
        text: "rust".into(),
    });
    handle.submit(ClientCommand::FetchJob { job_id: 3 });
    handle.submit(ClientCommand::Ask { text: "  ".into() });

    match next(&handle) {
        ClientEvent::Answered { results, query } => {
            assert_eq!(query, "rust");
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].rank, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        next(&handle),
        ClientEvent::JobLoaded {
            job_id: 3,
            description: "Rust dev".into(),
        }
    );
    match next(&handle) {
        ClientEvent::AskFailed(failure) => assert_eq!(failure.kind, FailureKind::Validation),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(client.call_count(), 2);
}

#[test]
fn resume_listing_failure_is_reported() {
    let client = Arc::new(ScriptedClient::failing_at(
        0,
        rag_client::RequestError::Http {
            status: 404,
            message: "404 Not Found".into(),
        },
    ));
    let handle = ClientHandle::with_client(client);
    handle.submit(ClientCommand::ListResumes {
        limit: 10,
        offset: 0,
    });

    match next(&handle) {
        ClientEvent::ListFailed(failure) => {
            assert_eq!(failure.kind, FailureKind::EndpointMissing)
        }
        other => panic!("unexpected event {other:?}"),
    }
}

struct Exploding;

#[async_trait::async_trait]
impl RequestClient for Exploding {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, RequestError> {
        panic!("transport blew up");
    }
}

#[test]
fn dead_client_thread_is_distinguishable_from_a_slow_request() {
    let handle = ClientHandle::with_client(Arc::new(Exploding));
    handle.submit(ClientCommand::Ask {
        text: "rust".into(),
    });

    let mut outcome = Ok(None);
    for _ in 0..100 {
        outcome = handle.recv_timeout(Duration::from_millis(50));
        if outcome.is_err() {
            break;
        }
    }
    assert_eq!(outcome, Err(ClientStopped));
    assert_eq!(handle.try_recv(), Err(ClientStopped));
}

#[test]
fn idle_client_times_out_without_stopping() {
    let handle = ClientHandle::with_client(Arc::new(ScriptedClient::succeeding()));
    assert_eq!(handle.recv_timeout(Duration::from_millis(20)), Ok(None));
    assert_eq!(handle.try_recv(), Ok(None));
}

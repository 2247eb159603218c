use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use rag_core::{
    update, AppState, Effect, Failure, FailureKind, Msg, NoticeKind, ResultItem, ResultsBody,
    Route, UploadBatchStatus, UploadPhase, EMPTY_QUERY, NO_FILES_SELECTED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(rag_logging::initialize_for_tests);
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn start_upload(state: AppState, names: &[&str]) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::FilesSelected(paths(names)));
    update(state, Msg::UploadClicked)
}

fn ask(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryChanged(text.to_string()));
    update(state, Msg::AskClicked)
}

fn item(rank: usize, score: f64, source: &str, snippet: &str) -> ResultItem {
    ResultItem {
        rank,
        relevance_score: score,
        source_label: source.to_string(),
        snippet_text: snippet.to_string(),
    }
}

#[test]
fn upload_without_files_is_rejected_locally() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::UploadClicked);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.upload.phase, UploadPhase::Failed);
    assert_eq!(
        view.upload.failure.as_ref().map(|f| f.kind),
        Some(FailureKind::Validation)
    );
    assert!(view.has_error());
    let notice = view.upload_notice.expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, NO_FILES_SELECTED);
    assert!(state.consume_dirty());
}

#[test]
fn upload_emits_one_effect_with_files_in_order() {
    init_logging();
    let (state, effects) = start_upload(AppState::new(), &["b.pdf", "a.pdf", "c.zip"]);

    assert_eq!(
        effects,
        vec![Effect::UploadFiles {
            paths: paths(&["b.pdf", "a.pdf", "c.zip"]),
        }]
    );
    let view = state.view();
    assert_eq!(view.upload.phase, UploadPhase::InProgress);
    assert_eq!(view.upload.total_count, 3);
    assert_eq!(view.selected_files, 0);
    assert!(view.busy);
    assert_eq!(
        view.upload_notice.map(|n| n.text),
        Some("Uploading 3 file(s)... 0/3 done".to_string())
    );
}

#[test]
fn second_upload_is_ignored_while_batch_runs() {
    init_logging();
    let (state, _) = start_upload(AppState::new(), &["a.pdf"]);
    let (state, effects) = start_upload(state, &["b.pdf"]);

    assert!(effects.is_empty());
    assert_eq!(state.view().upload.total_count, 1);
    // The new selection waits for the next click.
    assert_eq!(state.view().selected_files, 1);
}

#[test]
fn upload_progress_updates_status_and_settles() {
    init_logging();
    let (state, _) = start_upload(AppState::new(), &["a.pdf", "b.pdf"]);
    let (state, _) = update(
        state,
        Msg::UploadProgress(UploadBatchStatus {
            total_count: 2,
            processed_count: 1,
            failure: None,
            phase: UploadPhase::InProgress,
        }),
    );
    assert_eq!(state.view().upload.processed_count, 1);

    let (state, _) = update(
        state,
        Msg::UploadProgress(UploadBatchStatus {
            total_count: 2,
            processed_count: 2,
            failure: None,
            phase: UploadPhase::Succeeded,
        }),
    );
    let view = state.view();
    assert!(!view.busy);
    assert!(!view.has_error());
    assert_eq!(
        view.upload_notice.map(|n| n.text),
        Some("2 file(s) uploaded successfully.".to_string())
    );
}

#[test]
fn failed_batch_reports_count_before_failure() {
    init_logging();
    let (state, _) = start_upload(AppState::new(), &["a.pdf", "b.pdf", "c.pdf"]);
    let (state, _) = update(
        state,
        Msg::UploadProgress(UploadBatchStatus {
            total_count: 3,
            processed_count: 1,
            failure: Some(Failure::from_status(413, "413 Payload Too Large")),
            phase: UploadPhase::Failed,
        }),
    );
    let view = state.view();
    let notice = view.upload_notice.clone().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.starts_with("An error occurred: "));
    assert!(notice.text.contains("HTTP 413"));
    assert!(notice.text.ends_with("1 of 3 file(s) uploaded before the failure."));
}

#[test]
fn blank_query_is_rejected_without_effect() {
    init_logging();
    let (state, effects) = ask(AppState::new(), "   ");

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.asking);
    assert_eq!(view.query_notice.map(|n| n.text), Some(EMPTY_QUERY.to_string()));
}

#[test]
fn ask_submits_raw_text_verbatim() {
    init_logging();
    let raw = r#"  Python "machine learning"  "#;
    let (state, effects) = ask(AppState::new(), raw);

    assert_eq!(
        effects,
        vec![Effect::SubmitQuery {
            text: raw.to_string()
        }]
    );
    assert!(state.view().asking);

    // Double submit while waiting does nothing.
    let (_state, effects) = update(state, Msg::AskClicked);
    assert!(effects.is_empty());
}

#[test]
fn answer_navigates_to_results_with_highlights() {
    init_logging();
    let (state, _) = ask(AppState::new(), "Python");
    let (state, effects) = update(
        state,
        Msg::QueryAnswered {
            results: vec![item(1, 0.12345, "a.pdf", "Experienced Python developer")],
            query: "Python".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Results);
    let view = state.view();
    assert!(!view.asking);
    let results = view.results.expect("results view");
    assert_eq!(results.subtitle, "Found 1 relevant snippets for \"Python\"");
    match results.body {
        ResultsBody::Snippets(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].score, "0.1235");
            assert_eq!(items[0].source, "a.pdf");
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn answer_without_query_redirects_home() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::QueryAnswered {
            results: vec![item(1, 0.5, "a.pdf", "text")],
            query: String::new(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Home);
    assert!(state.view().results.is_none());
}

#[test]
fn navigating_to_results_directly_redirects_home() {
    init_logging();
    let (state, _) = ask(AppState::new(), "rust");
    let (state, _) = update(
        state,
        Msg::QueryAnswered {
            results: vec![item(1, 0.9, "a.pdf", "rust")],
            query: "rust".to_string(),
        },
    );
    assert_eq!(state.route(), Route::Results);

    // A reload of the results route has no payload any more.
    let (state, effects) = update(state, Msg::Navigate(Route::Results));
    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Home);
    assert!(state.view().results.is_none());
}

#[test]
fn navigating_away_drops_results() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::QueryAnswered {
            results: Vec::new(),
            query: "golang".to_string(),
        },
    );
    assert!(state.view().results.is_some());

    let (state, _) = update(state, Msg::Navigate(Route::Jobs));
    assert_eq!(state.route(), Route::Jobs);
    assert!(state.view().results.is_none());
}

#[test]
fn query_failure_surfaces_message_and_stays_home() {
    init_logging();
    let (state, _) = ask(AppState::new(), "rust");
    let (state, _) = update(
        state,
        Msg::QueryFailed(Failure::unreachable("connection refused")),
    );

    let view = state.view();
    assert_eq!(view.route, Route::Home);
    assert!(!view.asking);
    let notice = view.query_notice.expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("cannot connect"));
}

#[test]
fn stopped_client_fails_the_running_batch_and_ask() {
    init_logging();
    let (state, _) = start_upload(AppState::new(), &["a.pdf", "b.pdf"]);
    let (state, _) = update(
        state,
        Msg::UploadProgress(UploadBatchStatus {
            total_count: 2,
            processed_count: 1,
            failure: None,
            phase: UploadPhase::InProgress,
        }),
    );
    let (state, _) = ask(state, "rust");
    assert!(state.is_busy());

    let (state, _) = update(
        state,
        Msg::ClientStopped(Failure::unreachable("client stopped")),
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.upload.phase, UploadPhase::Failed);
    assert_eq!(view.upload.processed_count, 1);
    assert_eq!(
        view.upload_notice.map(|n| n.text),
        Some(
            "An error occurred: cannot connect to the server (client stopped). \
             1 of 2 file(s) uploaded before the failure."
                .to_string()
        )
    );
    assert_eq!(
        view.query_notice.map(|n| n.kind),
        Some(NoticeKind::Error)
    );
}

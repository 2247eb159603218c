use crate::failure::{EMPTY_JOB_DESCRIPTION, EMPTY_QUERY, NO_FILES_SELECTED};
use crate::{AppState, Effect, Failure, Msg, NavigationPayload, Route};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            state.select_files(files);
            Vec::new()
        }
        Msg::UploadClicked => {
            // One batch at a time; the selection is kept for the next click.
            if state.upload_in_progress() {
                return (state, Vec::new());
            }
            let paths = state.take_selected_files();
            if paths.is_empty() {
                state.reject_upload(Failure::validation(NO_FILES_SELECTED));
                Vec::new()
            } else {
                state.begin_upload(paths.len());
                vec![Effect::UploadFiles { paths }]
            }
        }
        Msg::UploadProgress(status) => {
            state.apply_upload_status(status);
            Vec::new()
        }
        Msg::QueryChanged(text) => {
            state.set_query_input(text);
            Vec::new()
        }
        Msg::AskClicked => {
            if state.is_asking() {
                Vec::new()
            } else if state.query_input().trim().is_empty() {
                state.reject_query(Failure::validation(EMPTY_QUERY));
                Vec::new()
            } else {
                state.begin_ask();
                vec![Effect::SubmitQuery {
                    text: state.query_input().to_string(),
                }]
            }
        }
        Msg::QueryAnswered { results, query } => {
            state.enter_results(Some(NavigationPayload { results, query }));
            Vec::new()
        }
        Msg::QueryFailed(failure) => {
            state.fail_ask(failure);
            Vec::new()
        }
        Msg::Navigate(route) => {
            state.navigate(route);
            match state.route() {
                Route::JobDetail(job_id) => vec![Effect::FetchJob { job_id }],
                _ => Vec::new(),
            }
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_input(text);
            Vec::new()
        }
        Msg::CreateJobClicked => {
            if state.is_creating_job() {
                Vec::new()
            } else if state.job_input().trim().is_empty() {
                state.reject_job(Failure::validation(EMPTY_JOB_DESCRIPTION));
                Vec::new()
            } else {
                state.begin_create_job();
                vec![Effect::CreateJob {
                    description: state.job_input().to_string(),
                }]
            }
        }
        Msg::JobCreated { job_id } => {
            state.job_created(job_id);
            vec![Effect::FetchJob { job_id }]
        }
        Msg::JobLoaded {
            job_id,
            description,
        } => {
            state.job_loaded(job_id, description);
            Vec::new()
        }
        Msg::MatchClicked => match state.begin_match() {
            Some(job_id) => vec![Effect::MatchJob {
                job_id,
                top_n: state.top_n(),
            }],
            None => Vec::new(),
        },
        Msg::TopNChanged(top_n) => {
            state.set_top_n(top_n);
            Vec::new()
        }
        Msg::MatchCompleted { job_id, results } => {
            state.matches_loaded(job_id, results);
            Vec::new()
        }
        Msg::JobCreateFailed(failure) => {
            state.fail_create_job(failure);
            Vec::new()
        }
        Msg::JobFetchFailed { job_id, failure } => {
            state.fail_fetch_job(job_id, failure);
            Vec::new()
        }
        Msg::MatchFailed { job_id, failure } => {
            state.fail_match(job_id, failure);
            Vec::new()
        }
        Msg::ClientStopped(failure) => {
            state.abort_pending(failure);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

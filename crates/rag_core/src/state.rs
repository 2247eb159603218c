use std::path::PathBuf;

use crate::results::{render_results, MatchResultItem, RenderOutcome, ResultItem, ResultsView};
use crate::view_model::{AppViewModel, JobDetailView};
use crate::{render_matches, Failure, UploadBatchStatus, UploadPhase};

pub type JobId = u64;

/// Candidates requested per job match unless the caller says otherwise.
pub const DEFAULT_TOP_N: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Results,
    Jobs,
    JobDetail(JobId),
}

/// Results and query handed from the ask flow to the results view.
///
/// Held in memory only. Any navigation drops it, so reaching the results
/// route again without a fresh answer (the reload case) redirects home.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPayload {
    pub results: Vec<ResultItem>,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Status text shown next to the control that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq)]
struct JobDetail {
    job_id: JobId,
    description: Option<String>,
    matches: Vec<MatchResultItem>,
    loading: bool,
    matching: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    route: Route,
    selected_files: Vec<PathBuf>,
    upload: UploadBatchStatus,
    upload_notice: Option<Notice>,
    query_input: String,
    asking: bool,
    query_notice: Option<Notice>,
    results: Option<ResultsView>,
    job_input: String,
    creating_job: bool,
    job: Option<JobDetail>,
    job_notice: Option<Notice>,
    top_n: Option<u32>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn upload_status(&self) -> &UploadBatchStatus {
        &self.upload
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    pub fn job_input(&self) -> &str {
        &self.job_input
    }

    pub fn is_asking(&self) -> bool {
        self.asking
    }

    /// Number of candidates requested by the next match.
    pub fn top_n(&self) -> u32 {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn is_creating_job(&self) -> bool {
        self.creating_job
    }

    pub fn upload_in_progress(&self) -> bool {
        self.upload.phase == UploadPhase::InProgress
    }

    /// True while any request started from this state is still pending.
    pub fn is_busy(&self) -> bool {
        self.upload_in_progress()
            || self.asking
            || self.creating_job
            || self
                .job
                .as_ref()
                .is_some_and(|job| job.loading || job.matching)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            route: self.route,
            selected_files: self.selected_files.len(),
            upload: self.upload.clone(),
            upload_notice: self.upload_notice.clone(),
            query_input: self.query_input.clone(),
            asking: self.asking,
            query_notice: self.query_notice.clone(),
            results: self.results.clone(),
            job_input: self.job_input.clone(),
            creating_job: self.creating_job,
            job: self.job.as_ref().map(|job| JobDetailView {
                job_id: job.job_id,
                title: format!("Gap Analysis for Job #{}", job.job_id),
                description: job.description.clone(),
                loading: job.loading,
                matching: job.matching,
                matches: render_matches(&job.matches),
            }),
            job_notice: self.job_notice.clone(),
            busy: self.is_busy(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_files(&mut self, files: Vec<PathBuf>) {
        self.selected_files = files;
        self.upload_notice = None;
        self.dirty = true;
    }

    pub(crate) fn take_selected_files(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.selected_files)
    }

    pub(crate) fn begin_upload(&mut self, total: usize) {
        self.upload = UploadBatchStatus {
            total_count: total,
            processed_count: 0,
            failure: None,
            phase: UploadPhase::InProgress,
        };
        self.upload_notice = self.upload.summary().map(Notice::info);
        self.dirty = true;
    }

    pub(crate) fn reject_upload(&mut self, failure: Failure) {
        self.apply_upload_status(UploadBatchStatus::rejected(failure));
    }

    pub(crate) fn apply_upload_status(&mut self, status: UploadBatchStatus) {
        self.upload_notice = status.summary().map(|text| {
            if status.phase == UploadPhase::Failed {
                Notice::error(text)
            } else {
                Notice::info(text)
            }
        });
        self.upload = status;
        self.dirty = true;
    }

    pub(crate) fn set_query_input(&mut self, text: String) {
        self.query_input = text;
        self.dirty = true;
    }

    pub(crate) fn reject_query(&mut self, failure: Failure) {
        self.query_notice = Some(Notice::error(failure.to_string()));
        self.dirty = true;
    }

    pub(crate) fn begin_ask(&mut self) {
        self.asking = true;
        self.query_notice = None;
        self.dirty = true;
    }

    pub(crate) fn fail_ask(&mut self, failure: Failure) {
        self.asking = false;
        self.query_notice = Some(Notice::error(format!(
            "An error occurred while asking the question: {failure}"
        )));
        self.dirty = true;
    }

    /// Enters the results view. Without a payload carrying a query the view
    /// is not rendered and the route falls back to the entry page.
    pub(crate) fn enter_results(&mut self, payload: Option<NavigationPayload>) {
        self.asking = false;
        let outcome = match &payload {
            Some(payload) => render_results(&payload.results, &payload.query),
            None => RenderOutcome::Redirect(Route::Home),
        };
        match outcome {
            RenderOutcome::View(view) => {
                self.results = Some(view);
                self.route = Route::Results;
            }
            RenderOutcome::Redirect(route) => {
                self.results = None;
                self.route = route;
            }
        }
        self.dirty = true;
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        match route {
            Route::Results => self.enter_results(None),
            Route::JobDetail(job_id) => self.open_job(job_id),
            other => {
                self.results = None;
                self.route = other;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn set_top_n(&mut self, top_n: u32) {
        self.top_n = Some(top_n.max(1));
    }

    pub(crate) fn set_job_input(&mut self, text: String) {
        self.job_input = text;
        self.dirty = true;
    }

    pub(crate) fn reject_job(&mut self, failure: Failure) {
        self.job_notice = Some(Notice::error(failure.to_string()));
        self.dirty = true;
    }

    pub(crate) fn begin_create_job(&mut self) {
        self.creating_job = true;
        self.job_notice = None;
        self.dirty = true;
    }

    pub(crate) fn job_created(&mut self, job_id: JobId) {
        self.creating_job = false;
        self.job_input.clear();
        self.open_job(job_id);
    }

    fn open_job(&mut self, job_id: JobId) {
        self.results = None;
        self.route = Route::JobDetail(job_id);
        self.job = Some(JobDetail {
            job_id,
            description: None,
            matches: Vec::new(),
            loading: true,
            matching: false,
        });
        self.job_notice = None;
        self.dirty = true;
    }

    pub(crate) fn job_loaded(&mut self, job_id: JobId, description: String) {
        if let Some(job) = self.job.as_mut().filter(|job| job.job_id == job_id) {
            job.description = Some(description);
            job.loading = false;
            self.dirty = true;
        }
    }

    /// Marks the open job as matching and returns its id, unless a match is
    /// already running or no job is open.
    pub(crate) fn begin_match(&mut self) -> Option<JobId> {
        if !matches!(self.route, Route::JobDetail(_)) {
            return None;
        }
        let job = self.job.as_mut().filter(|job| !job.matching)?;
        job.matching = true;
        job.matches.clear();
        self.job_notice = None;
        self.dirty = true;
        Some(job.job_id)
    }

    pub(crate) fn matches_loaded(&mut self, job_id: JobId, results: Vec<MatchResultItem>) {
        if let Some(job) = self.job.as_mut().filter(|job| job.job_id == job_id) {
            job.matches = results;
            job.matching = false;
            self.dirty = true;
        }
    }

    pub(crate) fn fail_create_job(&mut self, failure: Failure) {
        self.creating_job = false;
        self.show_job_failure(&failure);
    }

    /// Only the fetch of the open job is settled; a queued match keeps running.
    pub(crate) fn fail_fetch_job(&mut self, job_id: JobId, failure: Failure) {
        if let Some(job) = self.job.as_mut().filter(|job| job.job_id == job_id) {
            job.loading = false;
            self.show_job_failure(&failure);
        }
    }

    pub(crate) fn fail_match(&mut self, job_id: JobId, failure: Failure) {
        if let Some(job) = self.job.as_mut().filter(|job| job.job_id == job_id) {
            job.matching = false;
            self.show_job_failure(&failure);
        }
    }

    /// Settles every request still pending with `failure`. Used when no
    /// answer can arrive anymore.
    pub(crate) fn abort_pending(&mut self, failure: Failure) {
        if self.upload_in_progress() {
            let status = UploadBatchStatus {
                failure: Some(failure.clone()),
                phase: UploadPhase::Failed,
                ..self.upload.clone()
            };
            self.apply_upload_status(status);
        }
        if self.asking {
            self.fail_ask(failure.clone());
        }
        if self.creating_job {
            self.fail_create_job(failure.clone());
        }
        if let Some(job) = self.job.as_mut().filter(|job| job.loading || job.matching) {
            job.loading = false;
            job.matching = false;
            self.show_job_failure(&failure);
        }
    }

    fn show_job_failure(&mut self, failure: &Failure) {
        self.job_notice = Some(Notice::error(format!("An error occurred: {failure}")));
        self.dirty = true;
    }
}

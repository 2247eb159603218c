use crate::results::{MatchCard, ResultsView};
use crate::{JobId, Notice, Route, UploadBatchStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub selected_files: usize,
    pub upload: UploadBatchStatus,
    pub upload_notice: Option<Notice>,
    pub query_input: String,
    pub asking: bool,
    pub query_notice: Option<Notice>,
    /// Present only on the results route.
    pub results: Option<ResultsView>,
    pub job_input: String,
    pub creating_job: bool,
    pub job: Option<JobDetailView>,
    pub job_notice: Option<Notice>,
    pub busy: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn has_error(&self) -> bool {
        [&self.upload_notice, &self.query_notice, &self.job_notice]
            .into_iter()
            .flatten()
            .any(Notice::is_error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailView {
    pub job_id: JobId,
    pub title: String,
    pub description: Option<String>,
    pub loading: bool,
    pub matching: bool,
    pub matches: Vec<MatchCard>,
}

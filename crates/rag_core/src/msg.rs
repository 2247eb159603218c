use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked the files for the next upload batch.
    FilesSelected(Vec<PathBuf>),
    /// User asked to upload the selected files.
    UploadClicked,
    /// Client progress (or the terminal state) for the running batch.
    UploadProgress(crate::UploadBatchStatus),
    /// User edited the question box.
    QueryChanged(String),
    /// User submitted the current question.
    AskClicked,
    /// Backend answered; carries the navigation payload for the results view.
    QueryAnswered {
        results: Vec<crate::ResultItem>,
        query: String,
    },
    /// The question could not be answered.
    QueryFailed(crate::Failure),
    /// Direct navigation, e.g. a link or a reload of the current route.
    Navigate(crate::Route),
    /// User edited the job description box.
    JobDescriptionChanged(String),
    /// User asked to create a job from the current description.
    CreateJobClicked,
    JobCreated {
        job_id: crate::JobId,
    },
    JobLoaded {
        job_id: crate::JobId,
        description: String,
    },
    /// Number of candidates the next match should return.
    TopNChanged(u32),
    /// User asked for the top candidates of the open job.
    MatchClicked,
    MatchCompleted {
        job_id: crate::JobId,
        results: Vec<crate::MatchResultItem>,
    },
    JobCreateFailed(crate::Failure),
    JobFetchFailed {
        job_id: crate::JobId,
        failure: crate::Failure,
    },
    MatchFailed {
        job_id: crate::JobId,
        failure: crate::Failure,
    },
    /// The client went away; nothing pending will be answered.
    ClientStopped(crate::Failure),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

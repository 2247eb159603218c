use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UploadFiles { paths: Vec<PathBuf> },
    SubmitQuery { text: String },
    CreateJob { description: String },
    FetchJob { job_id: crate::JobId },
    MatchJob { job_id: crate::JobId, top_n: u32 },
}

use rag_core::{UploadBatch, UploadBatchStatus};
use rag_logging::{rag_debug, rag_info, rag_warn};
use uuid::Uuid;

use crate::{ApiRequest, FileBlob, RequestClient};

pub const UPLOAD_PATH: &str = "/api/resumes";
pub const UPLOAD_FIELD: &str = "file";
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// One file plus the idempotency key it is always submitted with.
///
/// Keep the task to retry: resubmitting the same task reuses the same key,
/// so the server can recognise the duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    file: FileBlob,
    idempotency_key: String,
}

impl UploadTask {
    pub fn new(file: FileBlob) -> Self {
        Self {
            file,
            idempotency_key: Uuid::new_v4().to_string(),
        }
    }

    pub fn file(&self) -> &FileBlob {
        &self.file
    }

    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    fn to_request(&self) -> ApiRequest {
        ApiRequest::post_file(UPLOAD_PATH, UPLOAD_FIELD, self.file.clone())
            .with_header(IDEMPOTENCY_HEADER, self.idempotency_key.clone())
    }
}

/// Receives every status change of a running batch.
pub trait StatusObserver: Send + Sync {
    fn observe(&self, status: &UploadBatchStatus);
}

impl<F> StatusObserver for F
where
    F: Fn(&UploadBatchStatus) + Send + Sync,
{
    fn observe(&self, status: &UploadBatchStatus) {
        self(status)
    }
}

/// Uploads files one at a time, stopping at the first failure.
pub struct UploadOrchestrator<'a> {
    client: &'a dyn RequestClient,
}

impl<'a> UploadOrchestrator<'a> {
    pub fn new(client: &'a dyn RequestClient) -> Self {
        Self { client }
    }

    /// Wraps each file in a fresh task and uploads the batch.
    pub async fn upload_all(
        &self,
        files: Vec<FileBlob>,
        observer: &dyn StatusObserver,
    ) -> UploadBatchStatus {
        let tasks: Vec<UploadTask> = files.into_iter().map(UploadTask::new).collect();
        self.upload_tasks(&tasks, observer).await
    }

    /// Uploads `tasks` in order. After a failure at index `p`, the caller can
    /// resume with `&tasks[p..]`, reusing the original keys.
    pub async fn upload_tasks(
        &self,
        tasks: &[UploadTask],
        observer: &dyn StatusObserver,
    ) -> UploadBatchStatus {
        let mut batch = match UploadBatch::start(tasks.len()) {
            Ok(batch) => batch,
            Err(failure) => {
                rag_warn!("Upload rejected: {}", failure);
                let status = UploadBatchStatus::rejected(failure);
                observer.observe(&status);
                return status;
            }
        };
        observer.observe(&batch.status());

        while let Some(index) = batch.current() {
            let task = &tasks[index];
            rag_info!(
                "Uploading file {}/{} name={} bytes={} key={}",
                index + 1,
                tasks.len(),
                task.file.file_name,
                task.file.len(),
                task.idempotency_key
            );
            match self.client.send(task.to_request()).await {
                Ok(response) => {
                    rag_debug!(
                        "Upload of {} accepted with status {}",
                        task.file.file_name,
                        response.status
                    );
                    batch.complete_current();
                }
                Err(err) => {
                    let failure = err.to_failure();
                    rag_warn!(
                        "Upload of {} failed ({:?}): {}; {} file(s) not attempted",
                        task.file.file_name,
                        failure.kind,
                        err,
                        tasks.len() - index - 1
                    );
                    batch.fail_current(failure);
                }
            }
            observer.observe(&batch.status());
        }

        batch.status()
    }
}

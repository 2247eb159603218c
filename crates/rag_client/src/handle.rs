use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use rag_core::{Failure, JobId, MatchResultItem, ResultItem, UploadBatchStatus};
use rag_logging::{rag_debug, rag_error, rag_info};

use crate::{
    list_resumes, FileBlob, JobsClient, Query, QuerySubmitter, ReqwestClient, RequestClient,
    RequestError, ResumePage, UploadOrchestrator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Upload { paths: Vec<PathBuf> },
    Ask { text: String },
    CreateJob { description: String },
    FetchJob { job_id: JobId },
    MatchJob { job_id: JobId, top_n: u32 },
    ListResumes { limit: u32, offset: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    UploadStatus(UploadBatchStatus),
    Answered {
        results: Vec<ResultItem>,
        query: String,
    },
    AskFailed(Failure),
    JobCreated {
        job_id: JobId,
    },
    JobLoaded {
        job_id: JobId,
        description: String,
    },
    MatchCompleted {
        job_id: JobId,
        results: Vec<MatchResultItem>,
    },
    CreateJobFailed(Failure),
    FetchJobFailed {
        job_id: JobId,
        failure: Failure,
    },
    MatchJobFailed {
        job_id: JobId,
        failure: Failure,
    },
    ResumesListed(ResumePage),
    ListFailed(Failure),
}

/// The client thread has exited; no further events will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("client thread stopped")]
pub struct ClientStopped;

/// Runs client commands on a dedicated thread, strictly one at a time, and
/// reports their outcomes as events.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: crate::ClientSettings) -> Result<Self, RequestError> {
        rag_info!("Client targeting {}", settings.base_url);
        let client = ReqwestClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn RequestClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    rag_error!("Failed to start client runtime: {}", err);
                    return;
                }
            };
            // Each command runs to completion before the next is received.
            while let Ok(command) = cmd_rx.recv() {
                rag_debug!("Client command {:?}", command);
                runtime.block_on(handle_command(client.as_ref(), command, &event_tx));
            }
            rag_debug!("Client thread exiting");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            rag_error!("Client thread is gone; command dropped");
        }
    }

    pub fn try_recv(&self) -> Result<Option<ClientEvent>, ClientStopped> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(ClientStopped),
        }
    }

    /// `Ok(None)` means nothing arrived in time; `Err` means nothing ever will.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ClientEvent>, ClientStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ClientStopped),
        }
    }
}

async fn handle_command(
    client: &dyn RequestClient,
    command: ClientCommand,
    event_tx: &mpsc::Sender<ClientEvent>,
) {
    let emit = |event: ClientEvent| {
        let _ = event_tx.send(event);
    };

    match command {
        ClientCommand::Upload { paths } => {
            let files: Result<Vec<FileBlob>, _> =
                paths.iter().map(|path| FileBlob::read(path)).collect();
            let files = match files {
                Ok(files) => files,
                Err(err) => {
                    emit(ClientEvent::UploadStatus(UploadBatchStatus::rejected(
                        err.to_failure(),
                    )));
                    return;
                }
            };
            let observer = |status: &UploadBatchStatus| {
                let _ = event_tx.send(ClientEvent::UploadStatus(status.clone()));
            };
            UploadOrchestrator::new(client)
                .upload_all(files, &observer)
                .await;
        }
        ClientCommand::Ask { text } => {
            let query = Query::new(text);
            match QuerySubmitter::new(client).ask(&query).await {
                Ok(results) => emit(ClientEvent::Answered {
                    results,
                    query: query.raw_text().to_string(),
                }),
                Err(err) => emit(ClientEvent::AskFailed(err.to_failure())),
            }
        }
        ClientCommand::CreateJob { description } => {
            match JobsClient::new(client).create_job(&description).await {
                Ok(job_id) => emit(ClientEvent::JobCreated { job_id }),
                Err(err) => emit(ClientEvent::CreateJobFailed(err.to_failure())),
            }
        }
        ClientCommand::FetchJob { job_id } => {
            match JobsClient::new(client).fetch_job(job_id).await {
                Ok(description) => emit(ClientEvent::JobLoaded {
                    job_id,
                    description,
                }),
                Err(err) => emit(ClientEvent::FetchJobFailed {
                    job_id,
                    failure: err.to_failure(),
                }),
            }
        }
        ClientCommand::MatchJob { job_id, top_n } => {
            match JobsClient::new(client).match_job(job_id, top_n).await {
                Ok(results) => emit(ClientEvent::MatchCompleted { job_id, results }),
                Err(err) => emit(ClientEvent::MatchJobFailed {
                    job_id,
                    failure: err.to_failure(),
                }),
            }
        }
        ClientCommand::ListResumes { limit, offset } => {
            match list_resumes(client, limit, offset).await {
                Ok(page) => emit(ClientEvent::ResumesListed(page)),
                Err(err) => emit(ClientEvent::ListFailed(err.to_failure())),
            }
        }
    }
}

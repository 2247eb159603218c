use std::time::Duration;

use rag_client::{
    ClientCommand, ClientEvent, ClientHandle, ClientSettings, ClientStopped, ResumePage,
};
use rag_core::{Effect, Failure, Msg};
use rag_logging::{rag_info, rag_warn};

/// Outcome of a client event: either a message for the state machine or
/// a resume listing, which has no place in the state.
#[derive(Debug)]
pub enum Delivery {
    Msg(Msg),
    Resumes(Result<ResumePage, Failure>),
}

pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let client = ClientHandle::new(settings)?;
        Ok(Self { client })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let command = match effect {
                Effect::UploadFiles { paths } => {
                    rag_info!("UploadFiles count={}", paths.len());
                    ClientCommand::Upload { paths }
                }
                Effect::SubmitQuery { text } => {
                    rag_info!("SubmitQuery text_len={}", text.len());
                    ClientCommand::Ask { text }
                }
                Effect::CreateJob { description } => {
                    rag_info!("CreateJob description_len={}", description.len());
                    ClientCommand::CreateJob { description }
                }
                Effect::FetchJob { job_id } => {
                    rag_info!("FetchJob job_id={}", job_id);
                    ClientCommand::FetchJob { job_id }
                }
                Effect::MatchJob { job_id, top_n } => {
                    rag_info!("MatchJob job_id={} top_n={}", job_id, top_n);
                    ClientCommand::MatchJob { job_id, top_n }
                }
            };
            self.client.submit(command);
        }
    }

    pub fn list_resumes(&self, limit: u32, offset: u64) {
        rag_info!("ListResumes limit={} offset={}", limit, offset);
        self.client
            .submit(ClientCommand::ListResumes { limit, offset });
    }

    /// Waits up to `timeout` for the next client event.
    pub fn next(&self, timeout: Duration) -> Result<Option<Delivery>, ClientStopped> {
        Ok(self.client.recv_timeout(timeout)?.map(map_event))
    }
}

fn map_event(event: ClientEvent) -> Delivery {
    let msg = match event {
        ClientEvent::UploadStatus(status) => Msg::UploadProgress(status),
        ClientEvent::Answered { results, query } => Msg::QueryAnswered { results, query },
        ClientEvent::AskFailed(failure) => {
            rag_warn!("Ask failed: {}", failure);
            Msg::QueryFailed(failure)
        }
        ClientEvent::JobCreated { job_id } => Msg::JobCreated { job_id },
        ClientEvent::JobLoaded {
            job_id,
            description,
        } => Msg::JobLoaded {
            job_id,
            description,
        },
        ClientEvent::MatchCompleted { job_id, results } => Msg::MatchCompleted { job_id, results },
        ClientEvent::CreateJobFailed(failure) => {
            rag_warn!("Job creation failed: {}", failure);
            Msg::JobCreateFailed(failure)
        }
        ClientEvent::FetchJobFailed { job_id, failure } => {
            rag_warn!("Fetching job {} failed: {}", job_id, failure);
            Msg::JobFetchFailed { job_id, failure }
        }
        ClientEvent::MatchJobFailed { job_id, failure } => {
            rag_warn!("Matching job {} failed: {}", job_id, failure);
            Msg::MatchFailed { job_id, failure }
        }
        ClientEvent::ResumesListed(page) => return Delivery::Resumes(Ok(page)),
        ClientEvent::ListFailed(failure) => {
            rag_warn!("Resume listing failed: {}", failure);
            return Delivery::Resumes(Err(failure));
        }
    };
    Delivery::Msg(msg)
}

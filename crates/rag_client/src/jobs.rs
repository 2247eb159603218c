use rag_core::{JobId, MatchResultItem, EMPTY_JOB_DESCRIPTION};
use rag_logging::{rag_info, rag_warn};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiRequest, ClientError, RequestClient, RequestError};

pub const JOBS_PATH: &str = "/api/jobs";

#[derive(Debug, Deserialize)]
struct CreatedJob {
    job_id: JobId,
}

#[derive(Debug, Deserialize)]
struct JobBody {
    description: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchBody {
    results: Option<Vec<MatchHit>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchHit {
    candidate: String,
    match_percentage: f64,
    relevance_score: f64,
    #[serde(default)]
    matching_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
}

/// Job postings and skill-gap matching against uploaded resumes.
pub struct JobsClient<'a> {
    client: &'a dyn RequestClient,
}

impl<'a> JobsClient<'a> {
    pub fn new(client: &'a dyn RequestClient) -> Self {
        Self { client }
    }

    pub async fn create_job(&self, description: &str) -> Result<JobId, ClientError> {
        if description.trim().is_empty() {
            return Err(ClientError::Validation(EMPTY_JOB_DESCRIPTION.to_string()));
        }
        let request = ApiRequest::post_json(JOBS_PATH, json!({ "description": description }));
        let created: CreatedJob = self.client.send(request).await?.decode()?;
        rag_info!("Created job {}", created.job_id);
        Ok(created.job_id)
    }

    /// Description of a job. An `error` field in a success body is a domain
    /// failure, e.g. an unknown id.
    pub async fn fetch_job(&self, job_id: JobId) -> Result<String, ClientError> {
        let request = ApiRequest::get(format!("{JOBS_PATH}/{job_id}"));
        let body: JobBody = self.client.send(request).await?.decode()?;
        match body {
            JobBody {
                error: Some(message),
                ..
            } => {
                rag_warn!("Job {} fetch returned error: {}", job_id, message);
                Err(RequestError::Domain { message }.into())
            }
            JobBody {
                description: Some(description),
                ..
            } => Ok(description),
            JobBody { .. } => Err(RequestError::decode("missing field `description`").into()),
        }
    }

    pub async fn match_job(
        &self,
        job_id: JobId,
        top_n: u32,
    ) -> Result<Vec<MatchResultItem>, ClientError> {
        let request = ApiRequest::post_json(
            format!("{JOBS_PATH}/{job_id}/match"),
            json!({ "top_n": top_n }),
        );
        let body: MatchBody = self.client.send(request).await?.decode()?;
        if let Some(message) = body.error {
            rag_warn!("Job {} match returned error: {}", job_id, message);
            return Err(RequestError::Domain { message }.into());
        }
        let hits = body
            .results
            .ok_or_else(|| RequestError::decode("missing field `results`"))?;

        let results: Vec<MatchResultItem> = hits
            .into_iter()
            .enumerate()
            .map(|(index, hit)| MatchResultItem {
                rank: index + 1,
                candidate: hit.candidate,
                match_percentage: hit.match_percentage.round().clamp(0.0, 100.0) as u8,
                relevance_score: hit.relevance_score,
                matching_skills: hit.matching_skills,
                missing_skills: hit.missing_skills,
            })
            .collect();
        rag_info!("Job {} matched {} candidate(s)", job_id, results.len());
        Ok(results)
    }
}

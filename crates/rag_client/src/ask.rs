use rag_core::{ResultItem, EMPTY_QUERY};
use rag_logging::{rag_info, rag_warn};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiRequest, ClientError, RequestClient};

pub const ASK_PATH: &str = "/api/ask";

/// Free-text question as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw_text: String,
}

impl Query {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    results: Vec<AskHit>,
}

#[derive(Debug, Deserialize)]
struct AskHit {
    score: f64,
    source: String,
    snippet: String,
}

pub struct QuerySubmitter<'a> {
    client: &'a dyn RequestClient,
}

impl<'a> QuerySubmitter<'a> {
    pub fn new(client: &'a dyn RequestClient) -> Self {
        Self { client }
    }

    /// Sends the raw text verbatim and ranks the answers by position.
    pub async fn ask(&self, query: &Query) -> Result<Vec<ResultItem>, ClientError> {
        if query.is_blank() {
            return Err(ClientError::Validation(EMPTY_QUERY.to_string()));
        }

        let request = ApiRequest::post_json(ASK_PATH, json!({ "text": query.raw_text() }));
        let response = self.client.send(request).await.inspect_err(|err| {
            rag_warn!("Ask failed: {}", err);
        })?;
        let decoded: AskResponse = response.decode()?;

        let results: Vec<ResultItem> = decoded
            .results
            .into_iter()
            .enumerate()
            .map(|(index, hit)| ResultItem {
                rank: index + 1,
                relevance_score: hit.score,
                source_label: hit.source,
                snippet_text: hit.snippet,
            })
            .collect();
        rag_info!(
            "Ask returned {} result(s) for a {}-char query",
            results.len(),
            query.raw_text().len()
        );
        Ok(results)
    }
}

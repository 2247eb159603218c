use serde::Deserialize;

use crate::upload::UPLOAD_PATH;
use crate::{ApiRequest, ClientError, RequestClient};

/// One page of uploaded resume file names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResumePage {
    pub items: Vec<String>,
    pub next_offset: Option<u64>,
}

pub async fn list_resumes(
    client: &dyn RequestClient,
    limit: u32,
    offset: u64,
) -> Result<ResumePage, ClientError> {
    let request = ApiRequest::get(format!("{UPLOAD_PATH}?limit={limit}&offset={offset}"));
    Ok(client.send(request).await?.decode()?)
}

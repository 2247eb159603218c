#![allow(dead_code)]

use std::sync::Mutex;

use bytes::Bytes;
use rag_client::{ApiRequest, ApiResponse, FileBlob, RequestBody, RequestClient, RequestError};

/// In-memory client that records every request and fails on chosen calls.
#[derive(Default)]
pub struct ScriptedClient {
    failures: Vec<(usize, RequestError)>,
    body: Bytes,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedClient {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing_at(index: usize, err: RequestError) -> Self {
        Self {
            failures: vec![(index, err)],
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Bytes::from(body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request.body {
                RequestBody::File { file, .. } => Some(file.file_name),
                _ => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl RequestClient for ScriptedClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };
        match self.failures.iter().find(|(at, _)| *at == index) {
            Some((_, err)) => Err(err.clone()),
            None => Ok(ApiResponse {
                status: 200,
                body: self.body.clone(),
            }),
        }
    }
}

pub fn pdf(name: &str) -> FileBlob {
    FileBlob::new(name, format!("%PDF-1.4 {name}").into_bytes())
}

pub fn http_error(status: u16) -> RequestError {
    RequestError::Http {
        status,
        message: format!("{status} from test"),
    }
}

/// Base URL of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

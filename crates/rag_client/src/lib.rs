//! Resume client: HTTP transport and the operations built on it.
mod ask;
mod error;
mod files;
mod handle;
mod jobs;
mod request;
mod resumes;
mod settings;
mod upload;

pub use ask::{Query, QuerySubmitter, ASK_PATH};
pub use error::{ClientError, RequestError};
pub use files::{content_type_for, FileBlob};
pub use handle::{ClientCommand, ClientEvent, ClientHandle, ClientStopped};
pub use jobs::{JobsClient, JOBS_PATH};
pub use request::{ApiRequest, ApiResponse, Method, ReqwestClient, RequestBody, RequestClient};
pub use resumes::{list_resumes, ResumePage};
pub use settings::{
    ClientSettings, Mode, SettingsError, API_URL_ENV, DEPLOYED_BASE_URL, DEVELOPMENT_BASE_URL,
    MODE_ENV,
};
pub use upload::{
    StatusObserver, UploadOrchestrator, UploadTask, IDEMPOTENCY_HEADER, UPLOAD_FIELD, UPLOAD_PATH,
};

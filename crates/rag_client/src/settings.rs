use url::Url;

pub const API_URL_ENV: &str = "RESUME_RAG_API_URL";
pub const MODE_ENV: &str = "RESUME_RAG_MODE";
pub const DEVELOPMENT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEPLOYED_BASE_URL: &str = "https://resume-rag-api.railway.app";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Development,
    #[default]
    Deployed,
}

impl Mode {
    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "deployed" | "production" | "prod" => Ok(Mode::Deployed),
            other => Err(SettingsError::UnknownMode(other.to_string())),
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Mode::Development => DEVELOPMENT_BASE_URL,
            Mode::Deployed => DEPLOYED_BASE_URL,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid base url {value:?}: {message}")]
    InvalidUrl { value: String, message: String },
    #[error("unknown mode {0:?} (expected development or deployed)")]
    UnknownMode(String),
}

/// Where and how the client talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: Url,
    pub user_agent: String,
}

impl ClientSettings {
    pub fn new(base_url: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            user_agent: default_user_agent(),
        })
    }

    pub fn for_mode(mode: Mode) -> Result<Self, SettingsError> {
        Self::new(mode.default_base_url())
    }

    /// Reads `RESUME_RAG_API_URL` and `RESUME_RAG_MODE` from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// An explicit URL wins in any mode; otherwise the mode picks its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mode = match lookup(MODE_ENV).filter(|value| !value.trim().is_empty()) {
            Some(value) => Mode::parse(&value)?,
            None => Mode::default(),
        };
        match lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            Some(url) => Self::new(&url),
            None => Self::for_mode(mode),
        }
    }

    /// Absolute URL for `path` (which starts with `/`), keeping any path
    /// prefix of the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
    }
}

fn parse_base_url(value: &str) -> Result<Url, SettingsError> {
    let invalid = |message: String| SettingsError::InvalidUrl {
        value: value.to_string(),
        message,
    };
    let url = Url::parse(value.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme {scheme}"))),
    }
}

fn default_user_agent() -> String {
    concat!("resume-rag/", env!("CARGO_PKG_VERSION")).to_string()
}

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use rag_client::{ClientSettings, SettingsError, API_URL_ENV, MODE_ENV};
use rag_core::{JobId, Msg, Route, DEFAULT_TOP_N};

#[derive(Parser, Debug)]
#[command(name = "rag_app", version, about = "Upload resumes and query them")]
pub struct Cli {
    /// Backend base URL; overrides RESUME_RAG_API_URL.
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,
    /// `development` or `deployed`; overrides RESUME_RAG_MODE.
    #[arg(long, global = true)]
    pub mode: Option<String>,
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
    /// Also write logs to ./resume_rag.log.
    #[arg(long = "log-file", global = true, action = ArgAction::SetTrue)]
    pub log_file: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload resume files, one after another.
    Upload { files: Vec<PathBuf> },
    /// Ask a question about the uploaded resumes.
    Ask { question: Vec<String> },
    /// List uploaded resumes.
    Resumes {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Create, inspect, or match job postings.
    Job {
        #[command(subcommand)]
        action: JobCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    Create {
        description: Vec<String>,
    },
    Show {
        id: JobId,
    },
    Match {
        id: JobId,
        #[arg(long = "top-n", default_value_t = DEFAULT_TOP_N)]
        top_n: u32,
    },
}

/// What a command asks the session to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Drive the state machine with these messages, in order.
    Messages(Vec<Msg>),
    ListResumes { limit: u32, offset: u64 },
}

impl Command {
    pub fn plan(self) -> Plan {
        match self {
            Command::Upload { files } => {
                Plan::Messages(vec![Msg::FilesSelected(files), Msg::UploadClicked])
            }
            Command::Ask { question } => Plan::Messages(vec![
                Msg::QueryChanged(question.join(" ")),
                Msg::AskClicked,
            ]),
            Command::Resumes { limit, offset } => Plan::ListResumes { limit, offset },
            Command::Job { action } => Plan::Messages(match action {
                JobCommand::Create { description } => vec![
                    Msg::Navigate(Route::Jobs),
                    Msg::JobDescriptionChanged(description.join(" ")),
                    Msg::CreateJobClicked,
                ],
                JobCommand::Show { id } => vec![Msg::Navigate(Route::JobDetail(id))],
                JobCommand::Match { id, top_n } => vec![
                    Msg::Navigate(Route::JobDetail(id)),
                    Msg::TopNChanged(top_n),
                    Msg::MatchClicked,
                ],
            }),
        }
    }
}

impl Cli {
    /// Settings from the flags, falling back to the process environment.
    pub fn settings(&self) -> Result<ClientSettings, SettingsError> {
        self.settings_with(|key| std::env::var(key).ok())
    }

    /// An explicit `--mode` hides an inherited URL so the mode's default applies.
    fn settings_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientSettings, SettingsError> {
        ClientSettings::from_lookup(|key: &str| match key {
            API_URL_ENV if self.api_url.is_some() => self.api_url.clone(),
            API_URL_ENV if self.mode.is_some() => None,
            MODE_ENV if self.mode.is_some() => self.mode.clone(),
            other => env(other),
        })
    }
}

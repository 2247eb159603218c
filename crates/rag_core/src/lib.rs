//! Resume client core: pure state machine, query lexer, and result rendering.
mod batch;
mod effect;
mod failure;
mod highlight;
mod msg;
mod query;
mod results;
mod state;
mod update;
mod view_model;

pub use batch::{BatchState, UploadBatch, UploadBatchStatus, UploadPhase};
pub use effect::Effect;
pub use failure::{Failure, FailureKind, EMPTY_JOB_DESCRIPTION, EMPTY_QUERY, NO_FILES_SELECTED};
pub use highlight::{highlight, Fragment};
pub use msg::Msg;
pub use query::{lex, tokenize, QueryToken};
pub use results::{
    format_score, render_matches, render_results, MatchCard, MatchResultItem, RenderOutcome,
    RenderedResult, ResultItem, ResultsBody, ResultsView, SkillList, NONE_FOUND, NO_RESULTS,
    REDACTION_NOTICE, RESULTS_TITLE,
};
pub use state::{
    AppState, JobId, NavigationPayload, Notice, NoticeKind, Route, DEFAULT_TOP_N,
};
pub use update::update;
pub use view_model::{AppViewModel, JobDetailView};

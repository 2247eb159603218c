use crate::highlight::{highlight, Fragment};
use crate::query::tokenize;
use crate::Route;

pub const RESULTS_TITLE: &str = "Query Results";
pub const NO_RESULTS: &str = "No results found for this query.";
pub const NONE_FOUND: &str = "None found";
pub const REDACTION_NOTICE: &str = "For your privacy, sensitive information like names, emails, \
and phone numbers has been automatically redacted from the snippets above.";

/// One ranked answer snippet. `rank` is the 1-based presentation position;
/// the score is opaque and backend-supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub rank: usize,
    pub relevance_score: f64,
    pub source_label: String,
    pub snippet_text: String,
}

/// One candidate from a job match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResultItem {
    pub rank: usize,
    pub candidate: String,
    pub match_percentage: u8,
    pub relevance_score: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub rank: usize,
    pub score: String,
    pub source: String,
    pub fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsBody {
    Empty { message: String },
    Snippets(Vec<RenderedResult>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub title: String,
    pub subtitle: String,
    pub query: String,
    pub terms: Vec<String>,
    pub body: ResultsBody,
    pub notice: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The view is not valid without a query; go here instead.
    Redirect(Route),
    View(ResultsView),
}

/// Fixed 4-decimal display of a relevance score.
pub fn format_score(score: f64) -> String {
    format!("{score:.4}")
}

/// Renders the results view for `raw_text`.
///
/// An empty (or whitespace-only) query is an invalid navigation state and
/// yields a redirect to the entry page without touching `results`.
pub fn render_results(results: &[ResultItem], raw_text: &str) -> RenderOutcome {
    if raw_text.trim().is_empty() {
        return RenderOutcome::Redirect(Route::Home);
    }

    let terms = tokenize(raw_text);
    let body = if results.is_empty() {
        ResultsBody::Empty {
            message: NO_RESULTS.to_string(),
        }
    } else {
        ResultsBody::Snippets(
            results
                .iter()
                .map(|item| RenderedResult {
                    rank: item.rank,
                    score: format_score(item.relevance_score),
                    source: item.source_label.clone(),
                    fragments: highlight(&item.snippet_text, &terms),
                })
                .collect(),
        )
    };

    RenderOutcome::View(ResultsView {
        title: RESULTS_TITLE.to_string(),
        subtitle: format!(
            "Found {} relevant snippets for \"{}\"",
            results.len(),
            raw_text
        ),
        query: raw_text.to_string(),
        terms,
        body,
        notice: REDACTION_NOTICE.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillList {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub heading: String,
    pub match_label: String,
    pub relevance: String,
    pub matching: SkillList,
    pub missing: SkillList,
}

pub fn render_matches(items: &[MatchResultItem]) -> Vec<MatchCard> {
    items
        .iter()
        .map(|item| MatchCard {
            heading: format!("#{}: {}", item.rank, item.candidate),
            match_label: format!("{}% Match", item.match_percentage),
            relevance: format!("Overall Relevance: {}", item.relevance_score),
            matching: skill_list("Matching Skills", &item.matching_skills),
            missing: skill_list("Missing Skills", &item.missing_skills),
        })
        .collect()
}

fn skill_list(label: &str, skills: &[String]) -> SkillList {
    let items = if skills.is_empty() {
        vec![NONE_FOUND.to_string()]
    } else {
        skills.to_vec()
    };
    SkillList {
        title: format!("{label} ({})", skills.len()),
        items,
    }
}

use std::io::IsTerminal;

use rag_client::ResumePage;
use rag_core::{
    AppViewModel, Fragment, JobDetailView, MatchCard, Notice, ResultsBody, ResultsView, Route,
    SkillList,
};

use super::constants::*;

/// How text is decorated on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub const PLAIN: Style = Style { color: false };

    /// ANSI decoration only on an interactive stdout without `NO_COLOR`.
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn mark(self, text: &str) -> String {
        if self.color {
            format!("{BOLD_YELLOW}{text}{RESET}")
        } else {
            format!("{HIGHLIGHT_MARKER}{text}{HIGHLIGHT_MARKER}")
        }
    }
}

/// Lines for the part of the view that belongs to the current route.
pub fn render(view: &AppViewModel, style: Style) -> Vec<String> {
    let mut lines = Vec::new();
    match view.route {
        Route::Home => {
            push_notice(&mut lines, view.upload_notice.as_ref(), style);
            if view.asking {
                lines.push(style.paint(DIM, "Searching..."));
            }
            push_notice(&mut lines, view.query_notice.as_ref(), style);
        }
        Route::Results => {
            if let Some(results) = &view.results {
                render_results(&mut lines, results, style);
            }
        }
        Route::Jobs => {
            if view.creating_job {
                lines.push(style.paint(DIM, "Creating job..."));
            }
            push_notice(&mut lines, view.job_notice.as_ref(), style);
        }
        Route::JobDetail(_) => {
            if let Some(job) = &view.job {
                render_job(&mut lines, job, style);
            }
            push_notice(&mut lines, view.job_notice.as_ref(), style);
        }
    }
    lines
}

pub fn render_notice(notice: &Notice, style: Style) -> String {
    if notice.is_error() {
        style.paint(RED, &notice.text)
    } else {
        notice.text.clone()
    }
}

pub fn render_resume_page(page: &ResumePage, style: Style) -> Vec<String> {
    if page.items.is_empty() {
        return vec!["No resumes uploaded yet.".to_string()];
    }
    let mut lines: Vec<String> = page.items.iter().map(|name| format!("  {name}")).collect();
    if let Some(next) = page.next_offset {
        lines.push(style.paint(DIM, &format!("More available: --offset {next}")));
    }
    lines
}

fn push_notice(lines: &mut Vec<String>, notice: Option<&Notice>, style: Style) {
    if let Some(notice) = notice {
        lines.push(render_notice(notice, style));
    }
}

fn render_results(lines: &mut Vec<String>, results: &ResultsView, style: Style) {
    lines.push(style.paint(BOLD, &results.title));
    lines.push(results.subtitle.clone());
    lines.push(String::new());
    match &results.body {
        ResultsBody::Empty { message } => lines.push(message.clone()),
        ResultsBody::Snippets(items) => {
            for item in items {
                let rank = format!("Rank #{} (Relevance Score: {})", item.rank, item.score);
                lines.push(style.paint(BOLD, &rank));
                lines.push(format!("  Source: {}", item.source));
                lines.push(format!("    {}", render_fragments(&item.fragments, style)));
            }
        }
    }
    lines.push(String::new());
    lines.push(style.paint(DIM, &results.notice));
}

fn render_fragments(fragments: &[Fragment], style: Style) -> String {
    fragments
        .iter()
        .map(|fragment| {
            if fragment.highlighted {
                style.mark(&fragment.text)
            } else {
                fragment.text.clone()
            }
        })
        .collect()
}

fn render_job(lines: &mut Vec<String>, job: &JobDetailView, style: Style) {
    lines.push(style.paint(BOLD, &job.title));
    match (&job.description, job.loading) {
        (_, true) => lines.push(style.paint(DIM, "Loading job description...")),
        (Some(description), false) => lines.push(description.clone()),
        (None, false) => {}
    }
    if job.matching {
        lines.push(style.paint(DIM, "Finding top candidates..."));
    }
    for card in &job.matches {
        render_card(lines, card, style);
    }
}

fn render_card(lines: &mut Vec<String>, card: &MatchCard, style: Style) {
    lines.push(String::new());
    lines.push(format!(
        "{}  {}",
        style.paint(BOLD, &card.heading),
        card.match_label
    ));
    lines.push(format!("  {}", card.relevance));
    render_skills(lines, &card.matching);
    render_skills(lines, &card.missing);
}

fn render_skills(lines: &mut Vec<String>, skills: &SkillList) {
    lines.push(format!("  {}: {}", skills.title, skills.items.join(", ")));
}

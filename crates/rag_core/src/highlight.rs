/// A run of snippet text, either plain or matching a highlight term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub highlighted: bool,
}

impl Fragment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Splits `text` into plain and highlighted fragments.
///
/// Matching is case-sensitive and exact. Scanning left to right, the first
/// term (in `terms` order) that matches at a position claims it, and the
/// scan resumes after the claimed span. Empty terms are ignored.
pub fn highlight(text: &str, terms: &[String]) -> Vec<Fragment> {
    let terms: Vec<&str> = terms
        .iter()
        .map(String::as_str)
        .filter(|term| !term.is_empty())
        .collect();

    let mut fragments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if let Some(term) = terms.iter().find(|term| rest.starts_with(**term)) {
            if plain_start < pos {
                fragments.push(Fragment::plain(&text[plain_start..pos]));
            }
            fragments.push(Fragment::marked(&rest[..term.len()]));
            pos += term.len();
            plain_start = pos;
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    if plain_start < text.len() {
        fragments.push(Fragment::plain(&text[plain_start..]));
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::{highlight, Fragment};

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn marked(fragments: &[Fragment]) -> Vec<&str> {
        fragments
            .iter()
            .filter(|f| f.highlighted)
            .map(|f| f.text.as_str())
            .collect()
    }

    #[test]
    fn marks_exact_term_only() {
        let fragments = highlight("Experienced Python developer", &terms(&["Python"]));
        assert_eq!(
            fragments,
            vec![
                Fragment::plain("Experienced "),
                Fragment::marked("Python"),
                Fragment::plain(" developer"),
            ]
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let fragments = highlight("python Python PYTHON", &terms(&["Python"]));
        assert_eq!(marked(&fragments), vec!["Python"]);
    }

    #[test]
    fn earlier_term_wins_on_overlap() {
        let fragments = highlight("machine learning", &terms(&["machine learning", "learning"]));
        assert_eq!(marked(&fragments), vec!["machine learning"]);

        let fragments = highlight("machine learning", &terms(&["machine", "machine learning"]));
        assert_eq!(marked(&fragments), vec!["machine"]);
    }

    #[test]
    fn marks_every_occurrence() {
        let fragments = highlight("Go, Go, Go", &terms(&["Go"]));
        assert_eq!(marked(&fragments), vec!["Go", "Go", "Go"]);
        let joined: String = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined, "Go, Go, Go");
    }

    #[test]
    fn no_terms_leaves_text_plain() {
        assert_eq!(highlight("abc", &[]), vec![Fragment::plain("abc")]);
        assert_eq!(highlight("abc", &terms(&[""])), vec![Fragment::plain("abc")]);
        assert!(highlight("", &terms(&["a"])).is_empty());
    }

    #[test]
    fn walks_multibyte_text() {
        let fragments = highlight("Zürich – Zürich", &terms(&["rich"]));
        assert_eq!(marked(&fragments), vec!["rich", "rich"]);
    }
}

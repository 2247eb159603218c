//! Query lexer producing highlight terms.
//!
//! Two token classes: a quoted phrase (`"machine learning"`) and a bare
//! word (a maximal run of alphanumerics and `_`). A quote only opens a
//! phrase at a word boundary; one glued to the end of a word (`don"t`, `5"`)
//! or without a closing partner is an ordinary non-word character, so the
//! text after it falls back to word splitting. The output only drives highlighting; the backend
//! always receives the raw text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryToken<'a> {
    Phrase(&'a str),
    Word(&'a str),
}

impl<'a> QueryToken<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            QueryToken::Phrase(text) | QueryToken::Word(text) => text,
        }
    }
}

const QUOTE: char = '"';

/// Lexes `raw` left to right, keeping tokens in order of appearance.
pub fn lex(raw: &str) -> Vec<QueryToken<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut after_word = false;

    while let Some(c) = raw[pos..].chars().next() {
        if c == QUOTE && !after_word {
            let interior_start = pos + QUOTE.len_utf8();
            if let Some(len) = raw[interior_start..].find(QUOTE) {
                let interior = &raw[interior_start..interior_start + len];
                // `""` and `"   "` carry nothing to highlight.
                if !interior.trim().is_empty() {
                    tokens.push(QueryToken::Phrase(interior));
                }
                pos = interior_start + len + QUOTE.len_utf8();
            } else {
                pos = interior_start;
            }
        } else if is_word_char(c) {
            let end = raw[pos..]
                .find(|ch: char| !is_word_char(ch))
                .map_or(raw.len(), |offset| pos + offset);
            tokens.push(QueryToken::Word(&raw[pos..end]));
            pos = end;
            after_word = true;
            continue;
        } else {
            pos += c.len_utf8();
        }
        after_word = false;
    }

    tokens
}

/// Highlight terms for `raw`, in order of appearance.
pub fn tokenize(raw: &str) -> Vec<String> {
    lex(raw)
        .into_iter()
        .map(|token| token.text().to_string())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

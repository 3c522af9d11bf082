use serde::Deserialize;

// ---------------------------------------------------------------------------
// Wire records
// ---------------------------------------------------------------------------

/// A quote record as returned by `GET /quotes/random`.
///
/// Only `content` and `author` survive past decoding. Every field is
/// required, so a record missing any of them is a decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub author_slug: String,
    pub length: u32,
    pub date_added: String,
    pub date_modified: String,
}

// ---------------------------------------------------------------------------
// Local records
// ---------------------------------------------------------------------------

/// The most recently fetched quote, as shown on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentQuote {
    pub quote: String,
    pub author: String,
}

impl CurrentQuote {
    pub fn is_empty(&self) -> bool {
        self.quote.is_empty() && self.author.is_empty()
    }

    pub fn share_text(&self) -> String {
        share_text(&self.quote, &self.author)
    }
}

impl From<Quote> for CurrentQuote {
    fn from(q: Quote) -> Self {
        Self {
            quote: q.content,
            author: q.author,
        }
    }
}

/// One saved (quote, author) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub text: String,
    pub author: String,
}

impl Favorite {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    pub fn share_text(&self) -> String {
        share_text(&self.text, &self.author)
    }
}

/// Plain-text form handed to the share sink: `"<quote>" - <author>`.
pub fn share_text(quote: &str, author: &str) -> String {
    format!("\"{quote}\" - {author}")
}

// src/extractors/filing_text.rs
use crate::edgar::client::PageFetcher;
use crate::edgar::models::FilingRecord;
use crate::utils::error::{EdgarError, ErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::fmt;

/// Character budget handed to the language model.
pub const MAX_FILING_TEXT_CHARS: usize = 5000;

pub const NO_RELEVANT_FILINGS: &str = "No relevant SEC filings available.";

/// Filing types considered when no explicit set is given.
pub const DEFAULT_VALID_TYPES: [&str; 4] = ["10-Q", "10-K", "8-K", "6-K"];

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

/// Outcome of pulling text from one filing. Never an error: every failure is
/// folded into a displayable variant so the summarizer always gets input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingText {
    Extracted {
        filing_type: String,
        date: String,
        text: String,
    },
    NoRelevantFilings,
    Unavailable {
        kind: ErrorKind,
        message: String,
    },
}

impl FilingText {
    pub fn text(&self) -> Option<&str> {
        match self {
            FilingText::Extracted { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Folds a filings failure into the text handed to the summarizer.
    pub fn from_error(err: &EdgarError) -> Self {
        FilingText::Unavailable {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FilingText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilingText::Extracted { text, .. } => f.write_str(text),
            FilingText::NoRelevantFilings => f.write_str(NO_RELEVANT_FILINGS),
            FilingText::Unavailable { message, .. } => {
                write!(f, "Error fetching SEC filing: {}", message)
            }
        }
    }
}

/// Selects the first filing (table order) whose type is in `valid_types`,
/// downloads it and returns its paragraph text capped at
/// [`MAX_FILING_TEXT_CHARS`] characters.
///
/// Selection is by position, not by parsed date; EDGAR lists newest first.
pub async fn fetch_sec_filing_text(
    fetcher: &dyn PageFetcher,
    filings: &[FilingRecord],
    valid_types: &[&str],
) -> FilingText {
    let Some(filing) = filings.iter().find(|f| f.is_one_of(valid_types)) else {
        tracing::info!("No filing among {} matches {:?}", filings.len(), valid_types);
        return FilingText::NoRelevantFilings;
    };

    tracing::info!("Selected {} filed {} for text extraction", filing.filing_type, filing.date);

    match fetcher.fetch_page(&filing.document_url).await {
        Ok(html) => {
            let text = truncate_chars(&paragraph_text(&html), MAX_FILING_TEXT_CHARS);
            tracing::debug!("Extracted {} characters from {}", text.chars().count(), filing.document_url);
            FilingText::Extracted {
                filing_type: filing.filing_type.clone(),
                date: filing.date.clone(),
                text,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch filing {}: {}", filing.document_url, e);
            FilingText::from_error(&e)
        }
    }
}

/// Text of every `<p>` element, whitespace collapsed, empty ones dropped,
/// joined by newlines.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| {
            let raw = p.text().collect::<String>();
            WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

// src/extractors/mod.rs
pub mod filing_text;

// Re-export key extraction types for convenience
pub use filing_text::{fetch_sec_filing_text, FilingText, DEFAULT_VALID_TYPES};

// src/utils/error.rs
use thiserror::Error;

/// Closed set of failure kinds the views branch on.
/// Display code matches on these, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An expected field is absent from a provider response.
    MissingField,
    /// Network error or non-success status from an HTTP call.
    FetchFailure,
    /// Expected structure (HTML table, JSON shape) is absent.
    ParseFailure,
    /// The language-model endpoint could not be reached or answered badly.
    BackendUnavailable,
}

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g. 500, 503

    #[error("SEC Rate limit likely exceeded")]
    RateLimited,

    #[error("Could not find specified filing: {0}")]
    FilingDocNotFound(String),

    #[error("Expected page structure not found: {0}")]
    StructureNotFound(String),

    #[error("Failed to parse EDGAR response: {0}")]
    Parse(String),
}

impl EdgarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdgarError::Network(e) if e.is_decode() => ErrorKind::ParseFailure,
            EdgarError::Network(_)
            | EdgarError::Http(_)
            | EdgarError::RateLimited
            | EdgarError::FilingDocNotFound(_) => ErrorKind::FetchFailure,
            EdgarError::StructureNotFound(_) | EdgarError::Parse(_) => ErrorKind::ParseFailure,
        }
    }
}

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Market data client setup failed: {0}")]
    Client(String),

    #[error("Market data provider error: {0}")]
    Provider(#[from] yfinance_rs::YfError),

    #[error("Provider returned no data for {0}")]
    NoData(String),

    #[error("Missing field in provider response: {0}")]
    MissingField(String),
}

impl MarketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::Network(e) if e.is_decode() => ErrorKind::ParseFailure,
            MarketError::Provider(yfinance_rs::YfError::Data(_)) => ErrorKind::ParseFailure,
            MarketError::Network(_) | MarketError::Client(_) | MarketError::Provider(_) => {
                ErrorKind::FetchFailure
            }
            MarketError::MissingField(_) => ErrorKind::MissingField,
            MarketError::NoData(_) => ErrorKind::ParseFailure,
        }
    }
}

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Language model backend unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Language model backend returned HTTP {0}")]
    Http(reqwest::StatusCode),

    #[error("Malformed language model response: {0}")]
    Malformed(String),
}

impl SummaryError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::BackendUnavailable
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError),

    #[error("Market data request failed: {0}")]
    Market(#[from] MarketError),

    #[error("Language model client setup failed: {0}")]
    Summary(#[from] SummaryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edgar_errors_map_to_kinds() {
        assert_eq!(EdgarError::RateLimited.kind(), ErrorKind::FetchFailure);
        assert_eq!(
            EdgarError::Http(reqwest::StatusCode::BAD_GATEWAY).kind(),
            ErrorKind::FetchFailure
        );
        assert_eq!(
            EdgarError::StructureNotFound("tableFile2".into()).kind(),
            ErrorKind::ParseFailure
        );
    }

    #[test]
    fn market_errors_map_to_kinds() {
        assert_eq!(
            MarketError::MissingField("marketCap".into()).kind(),
            ErrorKind::MissingField
        );
        assert_eq!(MarketError::NoData("ZZZZ".into()).kind(), ErrorKind::ParseFailure);
        assert_eq!(
            MarketError::Provider(yfinance_rs::YfError::Data("quote missing last/previous price".into())).kind(),
            ErrorKind::ParseFailure
        );
        assert_eq!(MarketError::Client("no TLS backend".into()).kind(), ErrorKind::FetchFailure);
        assert_eq!(
            SummaryError::Malformed("no response field".into()).kind(),
            ErrorKind::BackendUnavailable
        );
    }
}

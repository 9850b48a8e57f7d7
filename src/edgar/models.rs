// src/edgar/models.rs

/// One data row of the EDGAR company browse table.
/// Records keep page order; the site lists the newest filing first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRecord {
    pub filing_type: String,
    pub description: String,
    pub date: String,
    /// Absolute URL of the filing index document.
    pub document_url: String,
}

impl FilingRecord {
    pub fn is_one_of(&self, valid_types: &[&str]) -> bool {
        valid_types.iter().any(|t| *t == self.filing_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_match_is_exact() {
        let record = FilingRecord {
            filing_type: "10-K/A".to_string(),
            description: String::new(),
            date: "2024-01-05".to_string(),
            document_url: "https://www.sec.gov/x".to_string(),
        };
        assert!(!record.is_one_of(&["10-K"]));
        assert!(record.is_one_of(&["10-K", "10-K/A"]));
    }
}

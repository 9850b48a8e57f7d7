// src/storage/mod.rs
use crate::symbol::Symbol;
use crate::utils::error::StorageError;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes dashboard exports under `<base_dir>/<SYMBOL>/`.
pub struct ReportWriter {
    base_dir: PathBuf,
}

/// Facts about an export recorded next to the HTML page.
pub struct ReportMetadata<'a> {
    pub symbol: &'a Symbol,
    pub company_name: &'a str,
    pub futures_symbol: &'a str,
    pub filings_listed: usize,
    pub ai_overview: bool,
    pub generated_at: DateTime<Utc>,
}

/// Symbol text safe to use as a single path component: ASCII letters,
/// digits and `-` pass through, anything else becomes `_`.
fn path_component(symbol: &Symbol) -> String {
    symbol
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

impl ReportWriter {
    /// Creates a new ReportWriter, creating the base directory if needed.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    fn target_dir(&self, symbol: &Symbol) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(path_component(symbol));
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    fn stem(symbol: &Symbol, generated_at: DateTime<Utc>) -> String {
        format!("{}_{}_dashboard", path_component(symbol), generated_at.format("%Y%m%d_%H%M%S"))
    }

    /// Saves the rendered page, returning its path.
    pub fn save_page(
        &self,
        symbol: &Symbol,
        generated_at: DateTime<Utc>,
        html: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .target_dir(symbol)?
            .join(format!("{}.html", Self::stem(symbol, generated_at)));

        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(html.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved dashboard to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the export in JSON format
    pub fn save_metadata(&self, meta: &ReportMetadata<'_>) -> Result<PathBuf, StorageError> {
        let file_path = self
            .target_dir(meta.symbol)?
            .join(format!("{}_meta.json", Self::stem(meta.symbol, meta.generated_at)));

        let metadata = serde_json::json!({
            "symbol": meta.symbol.as_str(),
            "company_name": meta.company_name,
            "futures_symbol": meta.futures_symbol,
            "filings_listed": meta.filings_listed,
            "ai_overview": meta.ai_overview,
            "generated_at": meta.generated_at.to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("invincibull-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn page_and_metadata_land_under_symbol_dir() {
        let dir = scratch_dir("report");
        let writer = ReportWriter::new(&dir).unwrap();
        let symbol = Symbol::parse("msft").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

        let page = writer.save_page(&symbol, at, "<html></html>").unwrap();
        assert_eq!(page, dir.join("MSFT").join("MSFT_20240601_093000_dashboard.html"));
        assert_eq!(fs::read_to_string(&page).unwrap(), "<html></html>");

        let meta_path = writer
            .save_metadata(&ReportMetadata {
                symbol: &symbol,
                company_name: "Microsoft Corporation",
                futures_symbol: "MES1!",
                filings_listed: 40,
                ai_overview: false,
                generated_at: at,
            })
            .unwrap();
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta["symbol"], "MSFT");
        assert_eq!(meta["filings_listed"], 40);
        assert_eq!(meta["generated_at"], "2024-06-01T09:30:00+00:00");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn separators_and_dots_stay_inside_output_dir() {
        assert_eq!(path_component(&Symbol::parse("../..").unwrap()), "_____");
        assert_eq!(path_component(&Symbol::parse("..").unwrap()), "__");
        assert_eq!(path_component(&Symbol::parse("brk.b").unwrap()), "BRK_B");

        let dir = scratch_dir("traversal");
        let writer = ReportWriter::new(&dir).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let page = writer
            .save_page(&Symbol::parse("../..").unwrap(), at, "<html></html>")
            .unwrap();

        assert_eq!(page, dir.join("_____").join("______20240601_093000_dashboard.html"));
        fs::remove_dir_all(&dir).unwrap();
    }
}

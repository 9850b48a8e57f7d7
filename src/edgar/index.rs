// src/edgar/index.rs
use crate::edgar::models::FilingRecord;
use crate::symbol::Symbol;
use crate::utils::error::EdgarError;
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static FILINGS_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.tableFile2").expect("Failed to compile FILINGS_TABLE_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile CELL_SELECTOR"));

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR"));

/// Builds the EDGAR company browse URL listing the 40 most recent filings.
pub fn index_url(sec_base_url: &str, symbol: &Symbol) -> String {
    format!(
        "{}/cgi-bin/browse-edgar?action=getcompany&CIK={}&type=&dateb=&owner=include&start=0&count=40",
        sec_base_url, symbol
    )
}

/// Parses the `tableFile2` filings table of an EDGAR browse page.
///
/// The first row is the header. Rows with fewer than four cells are not data
/// rows and are skipped. Columns are [type, link, description, date]; the
/// link is resolved against `sec_base_url`.
pub fn parse_filings_index(html: &str, sec_base_url: &str) -> Result<Vec<FilingRecord>, EdgarError> {
    let base = Url::parse(sec_base_url)
        .map_err(|e| EdgarError::Parse(format!("invalid SEC base URL '{}': {}", sec_base_url, e)))?;
    let document = Html::parse_document(html);

    let table = document
        .select(&FILINGS_TABLE_SELECTOR)
        .next()
        .ok_or_else(|| EdgarError::StructureNotFound("table.tableFile2 missing from filings index".to_string()))?;

    let mut filings = Vec::new();
    for (row_idx, row) in table.select(&ROW_SELECTOR).enumerate().skip(1) {
        let cols: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if cols.len() <= 3 {
            tracing::trace!("Skipping row {} with {} cells", row_idx, cols.len());
            continue;
        }

        let href = cols[1]
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| EdgarError::StructureNotFound(format!("filing row {} has no document link", row_idx)))?;
        let document_url = base
            .join(href)
            .map_err(|e| EdgarError::Parse(format!("bad document link '{}': {}", href, e)))?;

        filings.push(FilingRecord {
            filing_type: cell_text(cols[0]),
            description: cell_text(cols[2]),
            date: cell_text(cols[3]),
            document_url: document_url.to_string(),
        });
    }

    tracing::debug!("Parsed {} filing rows", filings.len());
    Ok(filings)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const INDEX_PAGE: &str = r#"
        <html><body>
        <table class="tableFile2" summary="Results">
          <tr><th>Filings</th><th>Format</th><th>Description</th><th>Filed/Effective</th><th>File/Film Number</th></tr>
          <tr>
            <td nowrap="nowrap">10-K</td>
            <td nowrap="nowrap"><a href="/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm" id="documentsbutton">&nbsp;Documents</a></td>
            <td class="small">Annual report [Section 13 and 15(d), not S-K Item 405]<br />Acc-no: 0000320193-23-000106</td>
            <td>2023-11-03</td>
            <td>001-36743</td>
          </tr>
          <tr>
            <td nowrap="nowrap">8-K</td>
            <td nowrap="nowrap"><a href="/Archives/edgar/data/320193/000032019323000104/0000320193-23-000104-index.htm">&nbsp;Documents</a></td>
            <td class="small">Current report, items 2.02 and 9.01</td>
            <td>2023-11-02</td>
            <td>001-36743</td>
          </tr>
          <tr>
            <td nowrap="nowrap">4</td>
            <td nowrap="nowrap"><a href="/Archives/edgar/data/320193/000032019323000101/0000320193-23-000101-index.htm">&nbsp;Documents</a></td>
            <td class="small">Statement of changes in beneficial ownership of securities</td>
            <td>2023-12-20</td>
            <td></td>
          </tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn builds_browse_url() {
        let symbol = Symbol::parse("aapl").unwrap();
        assert_eq!(
            index_url("https://www.sec.gov", &symbol),
            "https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany&CIK=AAPL&type=&dateb=&owner=include&start=0&count=40"
        );
    }

    #[test]
    fn parses_every_data_row_in_page_order() {
        let filings = parse_filings_index(INDEX_PAGE, "https://www.sec.gov").unwrap();
        assert_eq!(filings.len(), 3);
        let types: Vec<&str> = filings.iter().map(|f| f.filing_type.as_str()).collect();
        assert_eq!(types, vec!["10-K", "8-K", "4"]);
        assert_eq!(filings[0].date, "2023-11-03");
        assert!(filings[0].description.starts_with("Annual report"));
        assert_eq!(
            filings[0].document_url,
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm"
        );
    }

    #[test]
    fn missing_table_is_a_structure_error() {
        let html = "<html><body><p>No matching Ticker Symbol.</p></body></html>";
        let err = parse_filings_index(html, "https://www.sec.gov").unwrap_err();
        assert!(matches!(err, EdgarError::StructureNotFound(_)), "got {:?}", err);
    }

    #[test]
    fn header_only_table_yields_no_records() {
        let html = r#"<table class="tableFile2"><tr><th>Filings</th></tr></table>"#;
        let filings = parse_filings_index(html, "https://www.sec.gov").unwrap();
        assert!(filings.is_empty());
    }

    #[test]
    fn data_row_without_link_is_rejected() {
        let html = r#"<table class="tableFile2">
            <tr><th>Filings</th></tr>
            <tr><td>10-Q</td><td>no link</td><td>Quarterly report</td><td>2024-02-02</td></tr>
        </table>"#;
        let err = parse_filings_index(html, "https://www.sec.gov").unwrap_err();
        assert!(matches!(err, EdgarError::StructureNotFound(_)));
    }
}

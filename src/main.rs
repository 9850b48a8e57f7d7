mod ai;
mod config;
mod dashboard;
mod edgar;
mod extractors;
mod market;
mod storage;
mod symbol;
mod utils;

use ai::{analyze_company, CompanyData, OllamaClient};
use chrono::{NaiveDate, Utc};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use config::AppConfig;
use dashboard::views;
use dashboard::{DashboardData, FUTURES_SYMBOLS};
use edgar::EdgarClient;
use extractors::DEFAULT_VALID_TYPES;
use market::performance::fetch_performance;
use market::{MarketDataProvider, YahooFinance};
use std::time::Duration;
use storage::{ReportMetadata, ReportWriter};
use symbol::Symbol;
use utils::AppError;

/// Ticker dashboard: company data, SEC filings and an AI overview
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// SEC EDGAR base URL
    #[arg(long, global = true, env = "SEC_BASE_URL", default_value = config::DEFAULT_SEC_BASE_URL)]
    sec_base_url: String,

    /// User-Agent sent to EDGAR ("Company contact@email")
    #[arg(long, global = true, env = "EDGAR_USER_AGENT", default_value = config::DEFAULT_EDGAR_USER_AGENT)]
    user_agent: String,

    /// Ollama server URL
    #[arg(long, global = true, env = "OLLAMA_URL", default_value = config::DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Ollama model used for the AI overview
    #[arg(long, global = true, env = "OLLAMA_MODEL", default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true, env = "HTTP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Company overview, valuation and price performance
    Company {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
    },
    /// Quarterly balance sheet and financial statements
    Financials {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
    },
    /// Most recent SEC filings
    Filings {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
    },
    /// Option chain for one expiration
    Options {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
        /// Expiration date (YYYY-MM-DD); nearest when omitted
        #[arg(long)]
        expiration: Option<NaiveDate>,
    },
    /// Analyst recommendation trend
    Ratings {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
    },
    /// Latest news articles
    News {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
    },
    /// Major holders breakdown
    Holders {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
    },
    /// Daily price history
    History {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
        /// First day (YYYY-MM-DD); defaults to one year back
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// AI overview built from company data, statements and the latest filing
    Analyze {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
        /// Filing types eligible for text extraction
        #[arg(long, value_delimiter = ',', default_values = DEFAULT_VALID_TYPES)]
        types: Vec<String>,
    },
    /// Export the dashboard as a standalone HTML page
    Dashboard {
        #[arg(value_parser = parse_symbol)]
        symbol: Symbol,
        /// Output directory for the exported page
        #[arg(short, long, default_value = "./output")]
        output_dir: String,
        /// Include the AI overview
        #[arg(long)]
        analyze: bool,
        /// Futures contract shown on the markets chart
        #[arg(long, default_value = FUTURES_SYMBOLS[0], value_parser = PossibleValuesParser::new(FUTURES_SYMBOLS))]
        futures: String,
    },
}

fn parse_symbol(input: &str) -> Result<Symbol, String> {
    Symbol::parse(input).map_err(|e| e.to_string())
}

impl Args {
    fn app_config(&self) -> Result<AppConfig, AppError> {
        AppConfig {
            sec_base_url: self.sec_base_url.clone(),
            edgar_user_agent: self.user_agent.clone(),
            ollama_url: self.ollama_url.clone(),
            model: self.model.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
        .validated()
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting with args: {:?}", args);

    let config = args.app_config()?;

    match args.command {
        Command::Company { symbol } => {
            let market = YahooFinance::new(&config)?;
            let (profile, quote, performance) = tokio::join!(
                market.profile(&symbol),
                market.quote(&symbol),
                fetch_performance(&market, &symbol, Utc::now().date_naive()),
            );
            print!("{}", views::company_view(symbol.as_str(), &profile, &quote, &performance));
        }
        Command::Financials { symbol } => {
            let market = YahooFinance::new(&config)?;
            let (balance_sheet, financials) = tokio::join!(
                market.quarterly_balance_sheet(&symbol),
                market.quarterly_financials(&symbol),
            );
            print!("{}", views::financials_view(&balance_sheet, &financials));
        }
        Command::Filings { symbol } => {
            let edgar = EdgarClient::new(&config)?;
            let filings = edgar.get_sec_filings(&symbol).await;
            print!("{}", views::filings_view(&filings));
        }
        Command::Options { symbol, expiration } => {
            let market = YahooFinance::new(&config)?;
            let chain = market.option_chain(&symbol, expiration).await;
            print!("{}", views::options_view(symbol.as_str(), &chain));
        }
        Command::Ratings { symbol } => {
            let market = YahooFinance::new(&config)?;
            print!("{}", views::ratings_view(&market.recommendations(&symbol).await));
        }
        Command::News { symbol } => {
            let market = YahooFinance::new(&config)?;
            print!("{}", views::news_view(&market.news(&symbol).await));
        }
        Command::Holders { symbol } => {
            let market = YahooFinance::new(&config)?;
            print!("{}", views::holders_view(&market.major_holders(&symbol).await));
        }
        Command::History { symbol, start, end } => {
            let today = Utc::now().date_naive();
            let end = end.unwrap_or(today);
            let start = start.unwrap_or(end - chrono::Duration::days(365));
            if start > end {
                return Err(AppError::Config(format!("--start {} is after --end {}", start, end)));
            }
            let market = YahooFinance::new(&config)?;
            let bars = market.history(&symbol, start, end).await;
            print!("{}", views::history_view(symbol.as_str(), &bars));
        }
        Command::Analyze { symbol, types } => {
            let market = YahooFinance::new(&config)?;
            let edgar = EdgarClient::new(&config)?;
            let model = OllamaClient::new(&config)?;
            let types: Vec<&str> = types.iter().map(String::as_str).collect();

            let (profile, filings, financials, balance_sheet) = tokio::join!(
                market.profile(&symbol),
                edgar.get_sec_filings(&symbol),
                market.quarterly_financials(&symbol),
                market.quarterly_balance_sheet(&symbol),
            );
            let company = CompanyData {
                symbol: symbol.as_str(),
                profile: &profile,
                quarterly_financials: &financials,
                quarterly_balance_sheet: &balance_sheet,
            };
            let narrative = analyze_company(&edgar, &model, &filings, &types, &company).await;

            let name = profile
                .as_ref()
                .ok()
                .and_then(|p| p.short_name.as_deref())
                .unwrap_or(symbol.as_str());
            print!("{}", views::ai_view(name, &narrative));
        }
        Command::Dashboard { symbol, output_dir, analyze: with_ai, futures } => {
            let writer = ReportWriter::new(&output_dir)?;
            let market = YahooFinance::new(&config)?;
            let edgar = EdgarClient::new(&config)?;

            let (profile, quote, performance, balance_sheet, financials, filings) = tokio::join!(
                market.profile(&symbol),
                market.quote(&symbol),
                fetch_performance(&market, &symbol, Utc::now().date_naive()),
                market.quarterly_balance_sheet(&symbol),
                market.quarterly_financials(&symbol),
                edgar.get_sec_filings(&symbol),
            );

            let narrative = if with_ai {
                let model = OllamaClient::new(&config)?;
                let company = CompanyData {
                    symbol: symbol.as_str(),
                    profile: &profile,
                    quarterly_financials: &financials,
                    quarterly_balance_sheet: &balance_sheet,
                };
                Some(analyze_company(&edgar, &model, &filings, &DEFAULT_VALID_TYPES, &company).await)
            } else {
                None
            };

            let data = DashboardData {
                symbol,
                futures_symbol: futures,
                profile,
                quote,
                performance,
                quarterly_balance_sheet: balance_sheet,
                quarterly_financials: financials,
                filings,
                narrative,
                generated_at: Utc::now(),
            };

            let html = dashboard::render_page(&data);
            let page = writer.save_page(&data.symbol, data.generated_at, &html)?;
            writer.save_metadata(&ReportMetadata {
                symbol: &data.symbol,
                company_name: data.company_name(),
                futures_symbol: &data.futures_symbol,
                filings_listed: data.filings.as_ref().map(Vec::len).unwrap_or(0),
                ai_overview: data.narrative.is_some(),
                generated_at: data.generated_at,
            })?;
            println!("Dashboard written to {}", page.display());
        }
    }

    Ok(())
}

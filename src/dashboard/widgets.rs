// src/dashboard/widgets.rs
//! TradingView embed snippets. The markup is opaque to us; only the JSON
//! config (symbol, theme, size) is ours.
use serde_json::{json, Value};

const EMBED_BASE: &str = "https://s3.tradingview.com/external-embedding";

/// Futures contracts offered on the futures panel.
pub const FUTURES_SYMBOLS: [&str; 11] = [
    "MES1!", "NQ1!", "YM1!", "RTY1!", "VX1!", "NKD1!", "HSI1!", "CL1!", "GC1!", "SI1!", "HG1!",
];

const TICKER_TAPE: [(&str, &str); 10] = [
    ("S&P 500 ETF", "AMEX:SPY"),
    ("Nasdaq 100 ETF", "NASDAQ:QQQ"),
    ("Russell 2000 ETF", "AMEX:IWM"),
    ("Dow Jones ETF", "AMEX:DIA"),
    ("Apple Inc.", "NASDAQ:AAPL"),
    ("Amazon.com Inc.", "NASDAQ:AMZN"),
    ("Alphabet Inc.", "NASDAQ:GOOG"),
    ("Microsoft Corp.", "NASDAQ:MSFT"),
    ("NVIDIA Corp.", "NASDAQ:NVDA"),
    ("Tesla Inc.", "NASDAQ:TSLA"),
];

fn embed(script: &str, config: &Value) -> String {
    // serde_json escapes quotes; '<' is escaped too so a symbol can't close the script tag
    let config = serde_json::to_string_pretty(config)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c");
    format!(
        r#"<!-- TradingView Widget BEGIN -->
<div class="tradingview-widget-container">
  <div class="tradingview-widget-container__widget"></div>
  <div class="tradingview-widget-copyright"><a href="https://www.tradingview.com/" rel="noopener nofollow" target="_blank"><span class="blue-text">Track all markets on TradingView</span></a></div>
  <script type="text/javascript" src="{base}/{script}" async>
{config}
  </script>
</div>
<!-- TradingView Widget END -->"#,
        base = EMBED_BASE,
        script = script,
        config = config
    )
}

pub fn ticker_tape() -> String {
    let symbols: Vec<Value> = TICKER_TAPE
        .iter()
        .map(|(description, pro_name)| json!({"description": description, "proName": pro_name}))
        .collect();
    embed(
        "embed-widget-ticker-tape.js",
        &json!({
            "symbols": symbols,
            "showSymbolLogo": true,
            "isTransparent": true,
            "displayMode": "compact",
            "colorTheme": "dark",
            "locale": "en"
        }),
    )
}

pub fn mini_symbol_overview(symbol: &str) -> String {
    embed(
        "embed-widget-mini-symbol-overview.js",
        &json!({
            "symbol": symbol,
            "width": "100%",
            "height": "100%",
            "locale": "en",
            "dateRange": "12M",
            "colorTheme": "dark",
            "isTransparent": true,
            "autosize": true,
            "largeChartUrl": "",
            "chartOnly": false
        }),
    )
}

pub fn advanced_chart(symbol: &str, width: u32, height: u32) -> String {
    embed(
        "embed-widget-advanced-chart.js",
        &json!({
            "width": width.to_string(),
            "height": height.to_string(),
            "symbol": symbol,
            "timezone": "Etc/UTC",
            "theme": "dark",
            "style": "1",
            "locale": "en",
            "range": "12M",
            "hide_side_toolbar": false,
            "allow_symbol_change": false,
            "calendar": false,
            "hide_volume": true,
            "support_host": "https://www.tradingview.com"
        }),
    )
}

pub fn financials(symbol: &str) -> String {
    embed(
        "embed-widget-financials.js",
        &json!({
            "isTransparent": true,
            "largeChartUrl": "",
            "displayMode": "regular",
            "width": 400,
            "height": 550,
            "colorTheme": "dark",
            "symbol": symbol,
            "locale": "en"
        }),
    )
}

pub fn events_calendar() -> String {
    embed(
        "embed-widget-events.js",
        &json!({
            "colorTheme": "dark",
            "isTransparent": false,
            "width": "350",
            "height": "500",
            "locale": "en",
            "importanceFilter": "0,1",
            "countryFilter": "us"
        }),
    )
}

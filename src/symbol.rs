// src/symbol.rs
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters kept from user input.
pub const MAX_SYMBOL_LEN: usize = 5;

/// A normalized ticker symbol, the lookup key for every downstream fetch.
///
/// Normalization is trimming, uppercasing and capping the length. Nothing
/// else is validated; an unknown symbol surfaces as empty or malformed
/// provider data further down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please enter a ticker symbol to fetch stock data.")]
pub struct EmptySymbol;

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, EmptySymbol> {
        let normalized: String = input
            .trim()
            .chars()
            .take(MAX_SYMBOL_LEN)
            .collect::<String>()
            .to_uppercase();
        if normalized.is_empty() {
            return Err(EmptySymbol);
        }
        Ok(Symbol(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = EmptySymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

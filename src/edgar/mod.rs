// src/edgar/mod.rs
pub mod client;
pub mod index;
pub mod models;

pub use client::{EdgarClient, PageFetcher};
pub use models::FilingRecord;

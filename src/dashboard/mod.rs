// src/dashboard/mod.rs
pub mod format;
pub mod page;
pub mod views;
pub mod widgets;

pub use page::{render_page, DashboardData};
pub use widgets::FUTURES_SYMBOLS;

//! Core types for daily-report
//!
//! Domain types shared across all other crates: reports, saved summaries,
//! month periods and the plain-text report renderings.

mod constants;
mod env_config;
mod error;
mod period;
mod report;
mod report_text;
mod summary;

pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use period::*;
pub use report::*;
pub use report_text::*;
pub use summary::*;

//! Storage backend trait abstraction
//!
//! Every operation is scoped by owner id: a record that exists but belongs to
//! someone else is indistinguishable from a missing one.

pub mod report;
pub mod summary;

pub use report::{ReportFilter, ReportStore, SortOrder};
pub use summary::SummaryStore;

//! Per-page processing outcomes
//!
//! Every candidate URL ends a run in exactly one outcome. The tally of
//! outcomes is reported at the end of the run.

mod page_outcome;

pub use page_outcome::{OutcomeCounts, PageOutcome};

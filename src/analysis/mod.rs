//! Analysis modules.
//!
//! `aggregator` holds the stateless reductions over feedback records;
//! `dashboard` assembles them into the admin and teacher views.

pub mod aggregator;
pub mod dashboard;

pub use dashboard::{admin_dashboard, teacher_dashboard};

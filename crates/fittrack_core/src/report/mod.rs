//! Plot input computed from the aggregate view.
//!
//! # Responsibility
//! - Normalize rep counts for continuous colour scales.
//! - Map exercise categories to their fixed colours.
//!
//! # Invariants
//! - Functions here are pure; no storage access.

pub mod scatter;

//! Workout log domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by store and report code.
//! - Keep raw form input representable so legacy rows round-trip.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `WorkoutId`.
//! - Records are inserted or deleted, never updated in place.

pub mod workout;

//! Domain model for todo items.
//!
//! # Responsibility
//! - Define the canonical task record shared by service, storage and CLI.
//! - Keep completion state transitions inside the model.
//!
//! # Invariants
//! - `completed_at` is set iff `completed` is true.
//! - Titles are never blank.

pub mod task;

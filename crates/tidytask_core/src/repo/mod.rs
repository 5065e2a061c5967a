//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the task collection.
//! - Isolate file format details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `TaskItem::validate()` before persistence.

pub mod task_repo;

//! Category suggestion for new tasks.
//!
//! # Responsibility
//! - Extract keywords from task text.
//! - Map keywords to a catalog category or a synthesized label.
//!
//! # Invariants
//! - Classification never fails and never mutates shared state.

pub mod catalog;
pub mod keywords;
pub mod suggest;

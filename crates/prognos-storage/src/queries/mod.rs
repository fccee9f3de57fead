//! SQL for each table group. Every function takes a borrowed connection so
//! callers choose the transaction scope.

pub mod documents;
pub mod history;
pub mod matrices;
pub mod memory;
pub mod predictions;
pub mod statistics;
pub mod summary_cache;

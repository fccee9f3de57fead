//! Graph construction and structural diagnostics.

pub mod builder;
pub mod cycles;

pub use builder::generate_initial_dag;
pub use cycles::cycle_report;

pub mod narrative;
pub mod summary;

pub use narrative::{completion_line, step_lines, COMPLETION_PREFIX, CONSOLE_HEADER};
pub use summary::{RunSummary, RESULTS_HEADER};

pub mod record;
pub mod row;

pub use record::StepRecord;
pub use row::{LineSource, TimeStepRow, TOKEN_DELIMITER};

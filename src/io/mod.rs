pub mod csv;
pub mod json;

pub use csv::{state_record, LogRecord, LogValue, StateLogger, StepLogger};
pub use json::{write_summary, write_summary_file, ApproachSummary};

pub mod command;
pub mod csv;
pub mod db;
pub mod error;
pub mod exam;
pub mod logger;
pub mod models;
pub mod present;
pub mod prompt;

// Re-exports for convenience
pub use command::{Command, Flow, dispatch, validate_id};
pub use csv::{export_csv, load_csv};
pub use error::CommandError;
pub use exam::{ExamSession, answers_match};
pub use models::{EndReason, ExamOutcome, ExamRecord, Quiz};
pub use present::{BufferPresenter, ConsolePresenter, Presenter};
pub use prompt::{DialoguerPrompter, Prompter};

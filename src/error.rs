use thiserror::Error;

/// Everything a single command can fail with. Each command recovers from
/// its own error at the dispatch boundary; nothing here escapes the REPL.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing the <{0}> parameter.")]
    MissingArgument(&'static str),

    #[error("The <id> parameter is not a number.")]
    NotANumber,

    #[error("There is no quiz associated to id={0}.")]
    NotFound(u64),

    /// One message per violated field, reported line by line.
    #[error("The quiz is invalid.")]
    Validation(Vec<String>),

    #[error("Repository error: {0}")]
    Repository(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while filling a document. They describe authoring mistakes in the
/// document (or a value that keeps reintroducing its key) and abort the whole call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(
        "replacing '{key}' did not converge within {limit} attempts; the value may contain \
         the key itself or the paragraph holds more than {limit} occurrences"
    )]
    RetryLimitExceeded { key: String, limit: usize },
    #[error("the initial tag '{initial}' was found, but the end tag '{end}' wasn't found after it")]
    EndDelimiterMissing { initial: String, end: String },
    #[error("the end tag '{end}' was found, but there is no initial tag '{initial}' before it")]
    InitialDelimiterMissing { initial: String, end: String },
    #[error("the end tag '{end}' appears before the initial tag '{initial}' in the same paragraph")]
    DelimitersReversed { initial: String, end: String },
}

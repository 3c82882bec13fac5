use thiserror::Error;

/// Errors raised while threading a working string through a filter chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `@substring` start lies before the string or past its end.
    #[error("substring start {start} is out of range for a {len}-character string")]
    SubstringOutOfRange { start: i64, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

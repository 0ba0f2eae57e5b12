use html::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not parse markup: {0}")]
    Parse(ParseError),
    #[error("tree nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("could not read settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::TooDeep { limit, .. } => Error::DepthExceeded { limit },
            e => Error::Parse(e),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

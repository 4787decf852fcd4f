use std::{error, fmt};

/// Conditions that abort a detection without producing a result
#[derive(Debug)]
pub enum Error {
    /// The observations contain a value that is neither a number nor missing
    InvalidInputKind,
    /// Every observation is missing, or there are no observations at all
    AllMissing,
    /// The criterion contains a value that is neither a number nor missing, or is empty
    InvalidCriterionKind,
    /// A detector option is unknown or has the wrong type
    Options(serde_json::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Options(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInputKind => f.write_str("x must be numeric"),
            Self::AllMissing => f.write_str("x values are all NA"),
            Self::InvalidCriterionKind => f.write_str("crit must be numeric"),
            Self::Options(err) => write!(f, "Invalid detector options: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Options(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of a detection
pub type Result<T> = ::std::result::Result<T, Error>;

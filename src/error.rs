use std::error;
use std::fmt;




/**
 * Error to represent a rejected insertion request.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A range whose start lies above its end. The bounds are kept in their
    /// `Debug` rendering so the error does not depend on the element type.
    InvalidRange { start: String, end: String },
}

impl Error {
    pub(crate) fn invalid_range<T: fmt::Debug>(start: T, end: T) -> Self {
        Error::InvalidRange {
            start: format!("{:?}", start),
            end: format!("{:?}", end),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            InvalidRange { start, end } => write!(fmt, "invalid range: start {} is above end {}", start, end),
        }
    }
}

impl error::Error for Error {}

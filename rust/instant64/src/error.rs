use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if this error reports a value outside its valid domain.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }

    pub fn out_of_range(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::OutOfRange {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// The canonical error for a tick count that falls outside
    /// `[0, MAX_TICKS]`.
    pub fn ticks_out_of_range() -> Error {
        Error::out_of_range(
            "ticks",
            "a valid instant must be between '0001-01-01 00:00:00' and '9999-12-31 23:59:59.9999999'",
        )
    }

    pub fn bad_binary_data(word: u64) -> Error {
        Error::out_of_range("binary", format!("{word:#018x} does not encode a valid instant"))
    }

    pub fn invalid_kind(value: u8) -> Error {
        Error(ErrorKind::InvalidKind { value }.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("value out of range {name}: {message}")]
    OutOfRange { name: String, message: String },

    #[error("invalid instant kind {value}, expected 0 (unspecified), 1 (utc) or 2 (local)")]
    InvalidKind { value: u8 },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

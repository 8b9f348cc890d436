use std::io;
use thiserror::Error;

//===========================================================================//

/// The ways a conversion into an ICO file can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The source image or the requested options can't be turned into an
    /// icon (empty or unreadable image, unsupported size, too many entries).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The resampler could not produce a bitmap of the requested size.
    #[error("resize failed: {0}")]
    Resize(String),

    /// A resized image could not be compressed into an ICO payload.
    #[error("payload encoding failed: {0}")]
    Encode(String),

    /// Bytes handed to the ICO parser are not a well-formed icon file.
    #[error("invalid ICO data: {0}")]
    InvalidData(String),

    /// The output (or input file) rejected a read or write.
    #[error("I/O error: {0}")]
    Sink(#[from] io::Error),
}

impl Error {
    /// Returns true if the failure was caused by the caller's input or
    /// options, rather than by the environment (a failing sink).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::InvalidData(_))
    }
}

/// Shorthand for results whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::Error;
    use std::io;

    #[test]
    fn io_errors_become_sink_failures() {
        let error: Error =
            io::Error::new(io::ErrorKind::WriteZero, "disk full").into();
        assert!(matches!(error, Error::Sink(_)));
        assert!(!error.is_input_error());
        assert_eq!(error.to_string(), "I/O error: disk full");
    }

    #[test]
    fn input_errors_are_distinguished() {
        assert!(Error::InvalidInput("empty".to_string()).is_input_error());
        assert!(!Error::Resize("overflow".to_string()).is_input_error());
        assert!(!Error::Encode("png".to_string()).is_input_error());
    }
}

//===========================================================================//

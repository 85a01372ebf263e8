//! Errors tagged with an explicit code.

use std::error::Error;

use crate::chain::{self, DynError};
use crate::coder::{LazyCoder, SharedCoder};
use crate::Code;

/// An error with an explicit code.
///
/// The message is the cause's message, unchanged. `source()` yields the
/// cause, so the tag is transparent to anything that walks the chain.
///
/// Any code may be attached, including `Ok` and `Unknown`; tagging with `Ok`
/// lets a non-error outcome travel through an error channel.
///
/// ```
/// use std::io;
/// use errcode::{Code, CodedError};
///
/// let err = CodedError::new(Code::NotFound, io::Error::other("no such user"));
/// assert_eq!(err.code(), Code::NotFound);
/// assert_eq!(err.to_string(), "no such user");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{cause}")]
pub struct CodedError {
    code: Code,
    #[source]
    cause: Box<dyn Error + Send + Sync>,
}

impl CodedError {
    /// Wrap `cause` and attach `code`.
    pub fn new<E>(code: Code, cause: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            code,
            cause: cause.into(),
        }
    }

    #[inline]
    pub fn code(&self) -> Code {
        self.code
    }

    /// The wrapped error.
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }

    /// Unwrap, returning the cause.
    pub fn into_cause(self) -> Box<dyn Error + Send + Sync> {
        self.cause
    }
}

static CODED_ERROR_CODER: LazyCoder = LazyCoder::from_fn(coded_error_code);

/// The coder for [`CodedError`]s.
pub fn coded_error_coder() -> SharedCoder {
    CODED_ERROR_CODER.get()
}

/// The code of the first [`CodedError`] in the chain.
pub fn coded_error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    chain::find::<CodedError>(err).map_or(Code::Unknown, CodedError::code)
}

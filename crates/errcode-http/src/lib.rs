//! HTTP status codes for errcode.
//!
//! [`HttpError`] attaches an HTTP status to any error; [`error_code`] finds
//! the first one in a cause chain and maps its status through [`to_code`].
//! `to_code` is also the table other coders reuse whenever all they have is
//! a numeric HTTP status.
//!
//! Errors from other HTTP stacks are recognized once wrapped in `HttpError`.

use std::error::Error;

use errcode::{chain, Code, DynError, LazyCoder, SharedCoder};
use http::StatusCode;

/// An error with an explicit HTTP status.
///
/// The message is the cause's message, unchanged.
///
/// ```
/// use errcode::Code;
/// use errcode_http::HttpError;
///
/// let err = HttpError::new(404, "no such bucket");
/// assert_eq!(err.to_string(), "no such bucket");
/// assert_eq!(errcode_http::error_code(Some(&err)), Code::NotFound);
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{cause}")]
pub struct HttpError {
    status: u16,
    #[source]
    cause: Box<dyn Error + Send + Sync>,
}

impl HttpError {
    /// Wrap `cause` and attach the HTTP `status`.
    pub fn new<E>(status: u16, cause: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            status,
            cause: cause.into(),
        }
    }

    /// Wrap `cause` with a typed status.
    pub fn with_status<E>(status: StatusCode, cause: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::new(status.as_u16(), cause)
    }

    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }

    pub fn into_cause(self) -> Box<dyn Error + Send + Sync> {
        self.cause
    }
}

static ERROR_CODER: LazyCoder = LazyCoder::from_fn(error_code);

/// The HTTP coder.
pub fn error_coder() -> SharedCoder {
    ERROR_CODER.get()
}

/// The code of the first [`HttpError`] in the chain.
pub fn error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    chain::find::<HttpError>(err).map_or(Code::Unknown, |e| to_code(e.status()))
}

/// The canonical code for an HTTP status.
///
/// Any 2xx is `Ok`. Statuses without a canonical counterpart are `Unknown`.
pub fn to_code(status: u16) -> Code {
    if (200..=299).contains(&status) {
        return Code::Ok;
    }
    match status {
        400 => Code::InvalidArgument,   // Bad Request
        401 => Code::Unauthenticated,   // Unauthorized
        403 => Code::PermissionDenied,  // Forbidden
        404 => Code::NotFound,          // Not Found
        409 => Code::Aborted,           // Conflict
        416 => Code::OutOfRange,        // Range Not Satisfiable
        429 => Code::ResourceExhausted, // Too Many Requests
        499 => Code::Canceled,          // Client Closed Request (nginx)
        500 => Code::Internal,          // Internal Server Error
        501 => Code::Unimplemented,     // Not Implemented
        503 => Code::Unavailable,       // Service Unavailable
        504 => Code::DeadlineExceeded,  // Gateway Timeout
        _ => Code::Unknown,
    }
}

/// [`to_code`] for a typed status.
#[inline]
pub fn from_status(status: StatusCode) -> Code {
    to_code(status.as_u16())
}

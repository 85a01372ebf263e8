//! The canonical status code taxonomy.
//!
//! Values and names follow the gRPC canonical codes so that a `Code` can be
//! handed to an RPC layer unchanged.
//!
//! | Value | Name                 |
//! |-------|----------------------|
//! | 0     | `OK`                 |
//! | 1     | `Canceled`           |
//! | 2     | `Unknown`            |
//! | 3     | `InvalidArgument`    |
//! | 4     | `DeadlineExceeded`   |
//! | 5     | `NotFound`           |
//! | 6     | `AlreadyExists`      |
//! | 7     | `PermissionDenied`   |
//! | 8     | `ResourceExhausted`  |
//! | 9     | `FailedPrecondition` |
//! | 10    | `Aborted`            |
//! | 11    | `OutOfRange`         |
//! | 12    | `Unimplemented`      |
//! | 13    | `Internal`           |
//! | 14    | `Unavailable`        |
//! | 15    | `DataLoss`           |
//! | 16    | `Unauthenticated`    |

use std::fmt;
use std::str::FromStr;

/// A canonical status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i32)]
pub enum Code {
    /// Not an error.
    Ok = 0,
    /// The operation was canceled, typically by the caller.
    Canceled = 1,
    /// The error could not be classified.
    #[default]
    Unknown = 2,
    /// The caller specified an invalid argument.
    InvalidArgument = 3,
    /// The deadline expired before the operation could complete.
    DeadlineExceeded = 4,
    /// A requested entity was not found.
    NotFound = 5,
    /// An entity the caller attempted to create already exists.
    AlreadyExists = 6,
    /// The caller lacks permission for the operation.
    PermissionDenied = 7,
    /// Some resource (quota, memory, connections) has been exhausted.
    ResourceExhausted = 8,
    /// The system is not in a state required for the operation.
    FailedPrecondition = 9,
    /// The operation was aborted, typically due to a concurrency conflict.
    Aborted = 10,
    /// The operation was attempted past the valid range.
    OutOfRange = 11,
    /// The operation is not implemented or not supported.
    Unimplemented = 12,
    /// An internal invariant was broken.
    Internal = 13,
    /// The service is currently unavailable.
    Unavailable = 14,
    /// Unrecoverable data loss or corruption.
    DataLoss = 15,
    /// The request lacks valid authentication credentials.
    Unauthenticated = 16,
}

impl Code {
    /// Every code, ordered by numeric value.
    pub const ALL: [Code; 17] = [
        Code::Ok,
        Code::Canceled,
        Code::Unknown,
        Code::InvalidArgument,
        Code::DeadlineExceeded,
        Code::NotFound,
        Code::AlreadyExists,
        Code::PermissionDenied,
        Code::ResourceExhausted,
        Code::FailedPrecondition,
        Code::Aborted,
        Code::OutOfRange,
        Code::Unimplemented,
        Code::Internal,
        Code::Unavailable,
        Code::DataLoss,
        Code::Unauthenticated,
    ];

    /// The canonical name of the code, e.g. `"NotFound"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::Canceled => "Canceled",
            Code::Unknown => "Unknown",
            Code::InvalidArgument => "InvalidArgument",
            Code::DeadlineExceeded => "DeadlineExceeded",
            Code::NotFound => "NotFound",
            Code::AlreadyExists => "AlreadyExists",
            Code::PermissionDenied => "PermissionDenied",
            Code::ResourceExhausted => "ResourceExhausted",
            Code::FailedPrecondition => "FailedPrecondition",
            Code::Aborted => "Aborted",
            Code::OutOfRange => "OutOfRange",
            Code::Unimplemented => "Unimplemented",
            Code::Internal => "Internal",
            Code::Unavailable => "Unavailable",
            Code::DataLoss => "DataLoss",
            Code::Unauthenticated => "Unauthenticated",
        }
    }

    /// The numeric value of the code.
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Look up a code by numeric value. Out-of-range values yield `Unknown`.
    pub const fn from_i32(value: i32) -> Code {
        if value < 0 || value >= Self::ALL.len() as i32 {
            return Code::Unknown;
        }
        Self::ALL[value as usize]
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, Code::Ok)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Code> for i32 {
    fn from(code: Code) -> Self {
        code as i32
    }
}

/// Returned by `Code::from_str` for names outside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code name: {0:?}")]
pub struct ParseCodeError(pub String);

impl FromStr for Code {
    type Err = ParseCodeError;

    /// Accepts `NotFound`, `notfound`, and `NOT_FOUND` style spellings.
    /// `Cancelled` is accepted as an alias of `Canceled`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if folded == "cancelled" {
            return Ok(Code::Canceled);
        }
        Code::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| ParseCodeError(s.to_string()))
    }
}

// ── tonic interop ─────────────────────────────────────────────────

#[cfg(feature = "tonic")]
impl From<tonic::Code> for Code {
    fn from(code: tonic::Code) -> Self {
        Code::from_i32(code as i32)
    }
}

#[cfg(feature = "tonic")]
impl From<Code> for tonic::Code {
    fn from(code: Code) -> Self {
        tonic::Code::from_i32(code as i32)
    }
}

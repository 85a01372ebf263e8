//! Filesystem error coder.
//!
//! Classifies `std::io::Error`s by kind. Only the four filesystem sentinels
//! are recognized; other io kinds (network, timeouts) are left `Unknown`
//! for more specific coders.

use std::io;

use crate::chain::{self, DynError};
use crate::coder::{LazyCoder, SharedCoder};
use crate::Code;

/// Checked in order; the first kind present anywhere in the chain wins.
const FS_KINDS: [(io::ErrorKind, Code); 4] = [
    (io::ErrorKind::AlreadyExists, Code::AlreadyExists),
    (io::ErrorKind::NotFound, Code::NotFound),
    (io::ErrorKind::PermissionDenied, Code::PermissionDenied),
    (io::ErrorKind::InvalidInput, Code::InvalidArgument),
];

static FS_ERROR_CODER: LazyCoder = LazyCoder::from_fn(file_system_error_code);

/// The coder for filesystem errors.
pub fn file_system_error_coder() -> SharedCoder {
    FS_ERROR_CODER.get()
}

pub fn file_system_error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    for (kind, code) in FS_KINDS {
        if chain::any(err, |e| io_kind(e) == Some(kind)) {
            return code;
        }
    }
    Code::Unknown
}

fn io_kind(err: &DynError) -> Option<io::ErrorKind> {
    err.downcast_ref::<io::Error>().map(io::Error::kind)
}

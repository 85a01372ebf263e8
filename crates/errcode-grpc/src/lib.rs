//! gRPC status extraction for errcode.
//!
//! A `tonic::Status` carries its own canonical code, so this coder is the
//! most confident one available for RPC errors and belongs ahead of
//! heuristic coders in a chain.

use errcode::{chain, Code, DynError, LazyCoder, SharedCoder};

static ERROR_CODER: LazyCoder = LazyCoder::from_fn(error_code);

/// The gRPC coder.
pub fn error_coder() -> SharedCoder {
    ERROR_CODER.get()
}

/// The code of the first `tonic::Status` in the chain.
///
/// ```
/// use errcode::Code;
///
/// let status = tonic::Status::not_found("no such shard");
/// assert_eq!(errcode_grpc::error_code(Some(&status)), Code::NotFound);
/// ```
pub fn error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    chain::find::<tonic::Status>(err).map_or(Code::Unknown, |s| Code::from(s.code()))
}

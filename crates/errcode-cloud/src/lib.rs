//! Cloud API client errors for errcode.
//!
//! Cloud client libraries surface failures in one of three shapes: a gRPC
//! status (RPC transports), an explicit HTTP status attached by the client,
//! or the HTTP client's own error. The coder tries them in that order. A
//! gRPC status may encode richer semantics than the HTTP status it rode in
//! on, so it wins whenever both are present.

use errcode::{chain, Code, DynError, ErrorCoders, LazyCoder, SharedCoder};

fn build_error_coder() -> SharedCoder {
    ErrorCoders::new(vec![
        errcode_grpc::error_coder(),
        errcode_http::error_coder(),
        api_error_coder(),
    ])
    .into_shared()
}

static ERROR_CODER: LazyCoder = LazyCoder::with(build_error_coder);
static API_ERROR_CODER: LazyCoder = LazyCoder::from_fn(api_error_code);

/// The cloud API coder: gRPC, then HTTP, then the client's own errors.
pub fn error_coder() -> SharedCoder {
    ERROR_CODER.get()
}

/// Classify `err` with [`error_coder`].
pub fn error_code(err: Option<&DynError>) -> Code {
    error_coder().error_code(err)
}

/// The coder for `reqwest::Error`s alone.
pub fn api_error_coder() -> SharedCoder {
    API_ERROR_CODER.get()
}

/// The code of the first `reqwest::Error` in the chain.
///
/// A response status maps through the HTTP table. Without a status, a
/// timeout is `DeadlineExceeded` and a failed connect is `Unavailable`.
pub fn api_error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    let Some(api_err) = chain::find::<reqwest::Error>(err) else {
        return Code::Unknown;
    };
    if let Some(status) = api_err.status() {
        return errcode_http::to_code(status.as_u16());
    }
    if api_err.is_timeout() {
        return Code::DeadlineExceeded;
    }
    if api_err.is_connect() {
        return Code::Unavailable;
    }
    Code::Unknown
}

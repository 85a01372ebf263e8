//! # errcode — canonical codes for arbitrary errors
//!
//! Given an error from any subsystem (HTTP client, gRPC stack, SQL driver,
//! filesystem, cancellation), derive one [`Code`] from the canonical gRPC
//! taxonomy so call sites can make uniform decisions about retries, log
//! levels, and response codes without knowing where the error came from.
//!
//! ## Design
//!
//! - An [`ErrorCoder`] maps `Option<&dyn Error>` to a `Code`. No error is
//!   always `Ok`; an error the coder does not recognize is always `Unknown`.
//!
//! - [`ErrorCoders`] chains coders. Members are asked in order and the first
//!   answer other than `Unknown` wins, so priority is list order.
//!
//! - [`compact`] flattens nested chains and drops repeated instances
//!   (by identity, never by value).
//!
//! - Domain coders walk the error's cause chain ([`chain`]) looking for the
//!   first error of their kind, then map it through a static table.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io;
//! use errcode::{compact, Code, CodedError, ErrorCoder};
//!
//! let coder = compact([
//!     errcode::coded_error_coder(),
//!     errcode::context_error_coder(),
//!     errcode::file_system_error_coder(),
//! ]);
//!
//! let missing = io::Error::from(io::ErrorKind::NotFound);
//! assert_eq!(coder.error_code(Some(&missing)), Code::NotFound);
//!
//! // An explicit tag takes priority because the coded coder comes first.
//! let tagged = CodedError::new(Code::Unavailable, missing);
//! assert_eq!(coder.error_code(Some(&tagged)), Code::Unavailable);
//!
//! assert_eq!(coder.error_code(None), Code::Ok);
//! ```
//!
//! ## Feature Flags
//!
//! | Flag    | Effect |
//! |---------|--------|
//! | `tokio` | Context coder recognizes `tokio::time::error::Elapsed` and cancelled `JoinError`s |
//! | `tonic` | `From` conversions between `Code` and `tonic::Code` |

mod code;
pub mod chain;
mod coder;
mod coders;
mod coded;
mod context;
mod fs;

// ── Public API ────────────────────────────────────────────────────

pub use code::{Code, ParseCodeError};
pub use chain::{chain, DynError};
pub use coder::{from_fn, same_coder, ErrorCoder, LazyCoder, SharedCoder};
pub use coders::{compact, ErrorCoders};
pub use coded::{coded_error_code, coded_error_coder, CodedError};
pub use context::{context_error_code, context_error_coder, Canceled, DeadlineExceeded};
pub use fs::{file_system_error_code, file_system_error_coder};

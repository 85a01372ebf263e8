//! Cancellation signals and their coder.
//!
//! [`Canceled`] and [`DeadlineExceeded`] are the two standard signals an
//! operation reports when it is abandoned. Return them (or wrap them) from
//! cancellable code paths and the context coder will classify them.
//!
//! With `feature = "tokio"`, tokio's own signals are recognized too:
//! `tokio::time::error::Elapsed` is a deadline, and a `JoinError` from an
//! aborted task is a cancellation.

use crate::chain::{self, DynError};
use crate::coder::{LazyCoder, SharedCoder};
use crate::Code;

/// The operation was canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("context canceled")]
pub struct Canceled;

/// The operation's deadline passed before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("context deadline exceeded")]
pub struct DeadlineExceeded;

static CONTEXT_ERROR_CODER: LazyCoder = LazyCoder::from_fn(context_error_code);

/// The coder for cancellation signals.
pub fn context_error_coder() -> SharedCoder {
    CONTEXT_ERROR_CODER.get()
}

/// `DeadlineExceeded` if a deadline signal is anywhere in the chain, else
/// `Canceled` if a cancellation signal is, else `Unknown`.
pub fn context_error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    if chain::any(err, is_deadline) {
        return Code::DeadlineExceeded;
    }
    if chain::any(err, is_canceled) {
        return Code::Canceled;
    }
    Code::Unknown
}

fn is_deadline(err: &DynError) -> bool {
    if err.is::<DeadlineExceeded>() {
        return true;
    }
    #[cfg(feature = "tokio")]
    if err.is::<tokio::time::error::Elapsed>() {
        return true;
    }
    false
}

fn is_canceled(err: &DynError) -> bool {
    if err.is::<Canceled>() {
        return true;
    }
    #[cfg(feature = "tokio")]
    if let Some(join_err) = err.downcast_ref::<tokio::task::JoinError>() {
        return join_err.is_cancelled();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, thiserror::Error)]
    #[error("fetch aborted")]
    struct Fetch(#[source] Canceled);

    #[derive(Debug, thiserror::Error)]
    #[error("retry failed")]
    struct Retry(#[source] Fetch2);

    #[derive(Debug, thiserror::Error)]
    #[error("fetch timed out")]
    struct Fetch2(#[source] DeadlineExceeded);

    #[test]
    fn signals() {
        assert_eq!(context_error_code(Some(&DeadlineExceeded)), Code::DeadlineExceeded);
        assert_eq!(context_error_code(Some(&Canceled)), Code::Canceled);
    }

    #[test]
    fn nil_and_unrelated() {
        assert_eq!(context_error_code(None), Code::Ok);
        let other = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(context_error_code(Some(&other)), Code::Unknown);
    }

    #[test]
    fn wrapped_signals() {
        assert_eq!(context_error_code(Some(&Fetch(Canceled))), Code::Canceled);
        assert_eq!(context_error_code(Some(&Retry(Fetch2(DeadlineExceeded)))), Code::DeadlineExceeded);

        let io_err = io::Error::new(io::ErrorKind::TimedOut, DeadlineExceeded);
        assert_eq!(context_error_code(Some(&io_err)), Code::DeadlineExceeded);
    }

    #[test]
    fn messages() {
        assert_eq!(Canceled.to_string(), "context canceled");
        assert_eq!(DeadlineExceeded.to_string(), "context deadline exceeded");
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn tokio_elapsed_is_deadline() {
        let elapsed = tokio::time::timeout(
            std::time::Duration::from_millis(1),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();
        assert_eq!(context_error_code(Some(&elapsed)), Code::DeadlineExceeded);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn tokio_aborted_task_is_canceled() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        let join_err = handle.await.unwrap_err();
        assert!(join_err.is_cancelled());
        assert_eq!(context_error_code(Some(&join_err)), Code::Canceled);
    }
}

//! Cause-chain traversal.
//!
//! Every domain coder answers the same question: "is there an error of my
//! kind anywhere in this chain?". The helpers here walk the chain once, from
//! the outermost error inward, and stop at the first match.
//!
//! `std::io::Error` needs special care: a custom io error built with
//! `io::Error::new(kind, inner)` does not report `inner` from `source()`
//! (it forwards `inner.source()` instead). [`Chain`] steps into the payload
//! via `get_ref()` so wrapped errors stay reachable.

use std::error::Error;
use std::io;

/// The error trait object every coder inspects.
pub type DynError = dyn Error + 'static;

/// Iterator over an error and its causes, outermost first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a DynError>,
}

/// Walk `err` and its causes.
///
/// ```
/// use std::io;
/// use errcode::{chain, CodedError, Code};
///
/// let err = CodedError::new(Code::NotFound, io::Error::from(io::ErrorKind::NotFound));
/// assert_eq!(chain(&err).count(), 2);
/// ```
pub fn chain(err: &DynError) -> Chain<'_> {
    Chain { next: Some(err) }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a DynError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = cause_of(current);
        Some(current)
    }
}

fn cause_of(err: &DynError) -> Option<&DynError> {
    if let Some(io_err) = err.downcast_ref::<io::Error>() {
        if let Some(inner) = io_err.get_ref() {
            return Some(inner as &DynError);
        }
    }
    err.source()
}

/// The first error of type `T` in the chain.
pub fn find<T>(err: &DynError) -> Option<&T>
where
    T: Error + 'static,
{
    chain(err).find_map(|e| e.downcast_ref::<T>())
}

/// The first `Some` produced by `f` over the chain.
///
/// Use this when a capability is spread over several concrete types, or when
/// the matched value needs further inspection.
pub fn find_map<'a, R, F>(err: &'a DynError, f: F) -> Option<R>
where
    F: FnMut(&'a DynError) -> Option<R>,
{
    chain(err).find_map(f)
}

/// Whether any error in the chain satisfies `pred`.
pub fn any<'a, F>(err: &'a DynError, pred: F) -> bool
where
    F: FnMut(&'a DynError) -> bool,
{
    chain(err).any(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Middle);

    #[derive(Debug, thiserror::Error)]
    #[error("middle")]
    struct Middle(#[source] io::Error);

    #[derive(Debug, thiserror::Error)]
    #[error("payload")]
    struct Payload;

    fn nested() -> Outer {
        Outer(Middle(io::Error::from(io::ErrorKind::NotFound)))
    }

    #[test]
    fn chain_visits_outermost_first() {
        let err = nested();
        let msgs: Vec<String> = chain(&err).map(|e| e.to_string()).collect();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0], "outer");
        assert_eq!(msgs[1], "middle");
    }

    #[test]
    fn find_reaches_deep_cause() {
        let err = nested();
        let io_err = find::<io::Error>(&err).unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert!(find::<Payload>(&err).is_none());
    }

    #[test]
    fn find_matches_outermost() {
        let err = Payload;
        assert!(find::<Payload>(&err).is_some());
    }

    #[test]
    fn chain_steps_into_custom_io_payload() {
        let err = io::Error::new(io::ErrorKind::Other, Payload);
        assert!(find::<Payload>(&err).is_some());
        assert_eq!(chain(&err).count(), 2);
    }

    #[test]
    fn chain_over_os_error_is_single() {
        let err = io::Error::from_raw_os_error(2);
        assert_eq!(chain(&err).count(), 1);
    }

    #[test]
    fn find_map_and_any() {
        let err = nested();
        let kind = find_map(&err, |e| e.downcast_ref::<io::Error>().map(|e| e.kind()));
        assert_eq!(kind, Some(io::ErrorKind::NotFound));
        assert!(any(&err, |e| e.is::<Middle>()));
        assert!(!any(&err, |e| e.is::<Payload>()));
    }
}

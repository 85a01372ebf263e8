//! Composite coders and `compact`.
//!
//! An [`ErrorCoders`] is an ordered chain of responsibility: members are
//! asked in order and the first answer other than `Unknown` wins. Priority
//! is list order, fixed at construction time.
//!
//! [`compact`] flattens nested composites and drops repeated instances,
//! keeping the position of each coder's first occurrence.

use std::fmt;
use std::slice;
use std::sync::Arc;

use crate::chain::DynError;
use crate::coder::{same_coder, ErrorCoder, SharedCoder};
use crate::Code;

/// An ordered, short-circuiting chain of coders.
#[derive(Clone, Default)]
pub struct ErrorCoders {
    coders: Vec<SharedCoder>,
}

impl ErrorCoders {
    /// Build a composite from `coders`, as given.
    ///
    /// Nested composites and duplicates are kept; use [`compact`] to flatten
    /// and dedupe.
    pub fn new(coders: Vec<SharedCoder>) -> Self {
        Self { coders }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coders.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, SharedCoder> {
        self.coders.iter()
    }

    pub fn as_slice(&self) -> &[SharedCoder] {
        &self.coders
    }

    /// Move the composite behind an `Arc` so it can be nested.
    pub fn into_shared(self) -> SharedCoder {
        Arc::new(self)
    }
}

impl ErrorCoder for ErrorCoders {
    fn error_code(&self, err: Option<&DynError>) -> Code {
        let Some(err) = err else {
            return Code::Ok;
        };
        for (index, coder) in self.coders.iter().enumerate() {
            let code = coder.error_code(Some(err));
            if code != Code::Unknown {
                tracing::trace!(index, %code, "error coder matched");
                return code;
            }
        }
        Code::Unknown
    }

    fn as_coders(&self) -> Option<&ErrorCoders> {
        Some(self)
    }
}

/// Two composites are equal when they hold the same instances in the same
/// order.
impl PartialEq for ErrorCoders {
    fn eq(&self, other: &Self) -> bool {
        self.coders.len() == other.coders.len()
            && self
                .coders
                .iter()
                .zip(other.coders.iter())
                .all(|(a, b)| same_coder(a, b))
    }
}

impl Eq for ErrorCoders {}

impl fmt::Debug for ErrorCoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for coder in &self.coders {
            match coder.as_coders() {
                Some(nested) => list.entry(nested),
                None => list.entry(&format_args!("{:p}", Arc::as_ptr(coder))),
            };
        }
        list.finish()
    }
}

impl From<Vec<SharedCoder>> for ErrorCoders {
    fn from(coders: Vec<SharedCoder>) -> Self {
        Self::new(coders)
    }
}

impl FromIterator<SharedCoder> for ErrorCoders {
    fn from_iter<I: IntoIterator<Item = SharedCoder>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ErrorCoders {
    type Item = &'a SharedCoder;
    type IntoIter = slice::Iter<'a, SharedCoder>;

    fn into_iter(self) -> Self::IntoIter {
        self.coders.iter()
    }
}

impl IntoIterator for ErrorCoders {
    type Item = SharedCoder;
    type IntoIter = std::vec::IntoIter<SharedCoder>;

    fn into_iter(self) -> Self::IntoIter {
        self.coders.into_iter()
    }
}

// ── compact ───────────────────────────────────────────────────────

/// Flatten and dedupe coders.
///
/// Composites are expanded depth-first at their position. A leaf is kept
/// only at its first occurrence; "same" means same instance, so two coders
/// built separately from the same function both survive.
///
/// ```
/// use errcode::{compact, coded_error_coder, context_error_coder, ErrorCoders};
///
/// let inner = ErrorCoders::new(vec![coded_error_coder(), context_error_coder()]);
/// let flat = compact([inner.into_shared(), coded_error_coder()]);
/// assert_eq!(flat.len(), 2);
/// ```
pub fn compact<I>(coders: I) -> ErrorCoders
where
    I: IntoIterator<Item = SharedCoder>,
{
    let mut out = Vec::new();
    let mut seen = 0usize;
    for coder in coders {
        seen += 1;
        compact_into(&mut out, &coder);
    }
    tracing::trace!(input = seen, output = out.len(), "compacted error coders");
    ErrorCoders::new(out)
}

fn compact_into(out: &mut Vec<SharedCoder>, elem: &SharedCoder) {
    if let Some(list) = elem.as_coders() {
        for member in list {
            compact_into(out, member);
        }
        return;
    }
    if !out.iter().any(|c| same_coder(c, elem)) {
        out.push(Arc::clone(elem));
    }
}

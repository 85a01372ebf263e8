//! The `ErrorCoder` capability and its function adapter.

use std::sync::{Arc, OnceLock};

use crate::chain::DynError;
use crate::coders::ErrorCoders;
use crate::Code;

/// Returns the code of an error.
///
/// Every implementation must honor the same contract:
///
/// - `None` (no error) → [`Code::Ok`]
/// - a recognized error → the matched code
/// - anything else → [`Code::Unknown`]
///
/// Implementations are stateless and never panic, so a single instance can
/// be shared across threads for the life of the process.
pub trait ErrorCoder: Send + Sync {
    /// Classify `err`.
    fn error_code(&self, err: Option<&DynError>) -> Code;

    /// The members of this coder, if it is a composite.
    ///
    /// [`compact`](crate::compact) expands coders that answer `Some` in place
    /// of themselves. Leaf coders keep the default.
    fn as_coders(&self) -> Option<&ErrorCoders> {
        None
    }
}

/// A shared, reference-counted coder.
///
/// Identity matters: two `SharedCoder`s are the same coder only when they
/// point at the same allocation (see [`same_coder`]).
pub type SharedCoder = Arc<dyn ErrorCoder>;

/// Whether `a` and `b` are the same coder instance.
///
/// Compares allocation addresses only. Vtable pointers are ignored, so the
/// answer does not depend on codegen-unit layout.
#[inline]
pub fn same_coder(a: &SharedCoder, b: &SharedCoder) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

struct FnCoder<F> {
    f: F,
}

impl<F> ErrorCoder for FnCoder<F>
where
    F: Fn(Option<&DynError>) -> Code + Send + Sync,
{
    #[inline]
    fn error_code(&self, err: Option<&DynError>) -> Code {
        (self.f)(err)
    }
}

/// Build a coder from a function.
///
/// Each call allocates a new instance, so two coders built from the same
/// function are distinct to [`compact`](crate::compact).
///
/// ```
/// use errcode::{from_fn, Code, DynError, ErrorCoder};
///
/// let coder = from_fn(|err: Option<&DynError>| match err {
///     None => Code::Ok,
///     Some(e) if e.to_string().contains("busy") => Code::Unavailable,
///     Some(_) => Code::Unknown,
/// });
/// assert_eq!(coder.error_code(None), Code::Ok);
/// ```
pub fn from_fn<F>(f: F) -> SharedCoder
where
    F: Fn(Option<&DynError>) -> Code + Send + Sync + 'static,
{
    Arc::new(FnCoder { f })
}

// ── LazyCoder — process-wide singleton coders ─────────────────────

enum Init {
    Func(fn(Option<&DynError>) -> Code),
    Build(fn() -> SharedCoder),
}

/// A coder created on first use and shared for the rest of the process.
///
/// Handing out the same instance on every call is what lets
/// [`compact`](crate::compact) collapse repeated references to a domain
/// coder.
///
/// ```
/// use errcode::{Code, DynError, LazyCoder, SharedCoder};
///
/// fn my_code(err: Option<&DynError>) -> Code {
///     if err.is_none() { Code::Ok } else { Code::Unknown }
/// }
///
/// static MY_CODER: LazyCoder = LazyCoder::from_fn(my_code);
///
/// pub fn my_coder() -> SharedCoder {
///     MY_CODER.get()
/// }
///
/// assert!(errcode::same_coder(&my_coder(), &my_coder()));
/// ```
pub struct LazyCoder {
    cell: OnceLock<SharedCoder>,
    init: Init,
}

impl LazyCoder {
    /// Wrap a classification function.
    pub const fn from_fn(f: fn(Option<&DynError>) -> Code) -> Self {
        Self {
            cell: OnceLock::new(),
            init: Init::Func(f),
        }
    }

    /// Use the coder returned by `build`, typically a composite.
    pub const fn with(build: fn() -> SharedCoder) -> Self {
        Self {
            cell: OnceLock::new(),
            init: Init::Build(build),
        }
    }

    /// The shared instance.
    pub fn get(&self) -> SharedCoder {
        let coder = self.cell.get_or_init(|| match self.init {
            Init::Func(f) => from_fn(f),
            Init::Build(build) => build(),
        });
        Arc::clone(coder)
    }
}

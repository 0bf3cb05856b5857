//! Error values returned by the queues.

use std::fmt;

/// Errors raised by checked queue operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The queue holds no element to access or remove.
    #[error("cannot access element in empty queue")]
    EmptyQueue,

    /// A logical index or range endpoint fell outside the valid bound.
    ///
    /// `bound` is the limit the index violated: `len()` for insertion and
    /// range ends, `len()` (exclusive) for element access, or the range end
    /// when a range starts after it ends.
    #[error("index out of range: {index} (bound is {bound})")]
    IndexOutOfRange {
        /// The offending logical index.
        index: usize,
        /// The bound it violated.
        bound: usize,
    },
}

impl Error {
    #[inline]
    pub(crate) fn out_of_range(index: usize, bound: usize) -> Error {
        Error::IndexOutOfRange { index, bound }
    }
}

/// `Result` alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error value indicating insufficient capacity
///
/// Only bounded pushes on an [`SpscQueue`](crate::SpscQueue) or its
/// [`Producer`](crate::Producer) produce it. The rejected element is handed
/// back to the caller.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, thiserror::Error)]
#[error("insufficient capacity")]
pub struct CapacityError<T = ()> {
    /// The element that caused the error.
    pub element: T,
}

impl<T> CapacityError<T> {
    /// Recovers the rejected element.
    #[inline]
    pub fn into_inner(self) -> T {
        self.element
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CapacityError: insufficient capacity")
    }
}

use thiserror::Error;

/// Failures raised by set, view and cursor operations.
///
/// Every failing call returns before the backing word is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A single element outside the supported range, either the global
    /// domain or the mask of a view.
    #[error("value {0} is outside the supported range")]
    OutOfRange(i128),

    /// Range bounds that are out of domain, reversed, or not contained in
    /// the view they are derived from.
    #[error("invalid range {from}..{to}")]
    InvalidRange { from: i128, to: i128 },

    /// A value that cannot be an element at all.
    #[error("value is not an integer")]
    NotAnInteger,

    /// `first`/`last` on a set without members.
    #[error("set is empty")]
    Empty,

    /// Cursor removal without a preceding step, or twice for the same step.
    #[error("no element to remove")]
    IllegalState,
}

pub type Result<T> = core::result::Result<T, Error>;

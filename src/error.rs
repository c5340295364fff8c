//! Error type for spherical region and pixelization operations.

use thiserror::Error;

/// Unified error type for the crate.
///
/// Every failure is raised synchronously at the call that caused it; there
/// are no deferred errors, retries, or partial results. Construction of a
/// region either yields a valid immutable value or fails entirely, and
/// decoding either reconstructs a whole object or fails before anything is
/// returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// An argument was malformed or out of its documented domain:
  /// degenerate or non-convex vertex input, an out-of-range subdivision
  /// level, or a trixel id without a valid sentinel bit.
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),

  /// A binary buffer could not be decoded: unknown or mismatched type
  /// tag, truncated input, or a length that does not match the encoded
  /// payload.
  #[error("decode failed: {0}")]
  Decode(&'static str),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    let err = Error::InvalidArgument("a convex polygon requires at least 3 vertices");
    assert_eq!(
      err.to_string(),
      "invalid argument: a convex polygon requires at least 3 vertices"
    );
    let err = Error::Decode("type tag mismatch");
    assert_eq!(err.to_string(), "decode failed: type tag mismatch");
  }

  #[test]
  fn test_send_sync() {
    fn _assert_send<T: Send>() {}
    fn _assert_sync<T: Sync>() {}
    _assert_send::<Error>();
    _assert_sync::<Error>();
  }
}

// src/htm/ids.rs

//! Trixel id encoding: sentinel bit, root number, and 2 bits per level.

use crate::constants::{MAX_LEVEL, ROOT_SYMBOLS};
use crate::error::{Error, Result};
use crate::types::TrixelId;

/// Extracts the subdivision level encoded in a trixel id.
///
/// The level is recovered from the position of the id's leading (sentinel)
/// bit: a level-`L` id has its highest bit at position `3 + 2 * L`.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for zero, for ids whose leading bit
/// sits at an invalid position, and for ids deeper than [`MAX_LEVEL`].
pub fn level_of(id: TrixelId) -> Result<u32> {
  if id.0 == 0 {
    return Err(Error::InvalidArgument("trixel id is zero"));
  }
  let high_bit = 63 - id.0.leading_zeros();
  if high_bit < 3 || (high_bit - 3) % 2 != 0 {
    return Err(Error::InvalidArgument("trixel id has a malformed sentinel bit"));
  }
  let level = (high_bit - 3) / 2;
  if level > MAX_LEVEL {
    return Err(Error::InvalidArgument("trixel id is deeper than the maximum level"));
  }
  Ok(level)
}

/// True if `id` is a well-formed trixel id.
#[must_use]
pub fn is_valid(id: TrixelId) -> bool {
  level_of(id).is_ok()
}

/// The human-readable path form of a trixel id: one symbol naming the
/// root triangle followed by one digit in `0`-`3` per level, so the
/// string has `1 + level` characters. The form is a stable external
/// label; two ids are equal iff their strings are.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for a malformed id.
pub fn as_string(id: TrixelId) -> Result<String> {
  let level = level_of(id)?;
  let mut s = String::with_capacity(level as usize + 1);
  let root = (id.0 >> (2 * level)) & 7;
  s.push(ROOT_SYMBOLS[root as usize] as char);
  for k in (0..level).rev() {
    let digit = (id.0 >> (2 * k)) & 3;
    s.push((b'0' + digit as u8) as char);
  }
  Ok(s)
}

/// The id of the trixel one level up.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for a malformed id or a root, which
/// has no parent.
pub fn parent(id: TrixelId) -> Result<TrixelId> {
  let level = level_of(id)?;
  if level == 0 {
    return Err(Error::InvalidArgument("root trixels have no parent"));
  }
  Ok(TrixelId(id.0 >> 2))
}

/// The ids of the 4 child trixels one level down, corner children first
/// and the center child last.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for a malformed id or an id already
/// at [`MAX_LEVEL`].
pub fn children(id: TrixelId) -> Result<[TrixelId; 4]> {
  let level = level_of(id)?;
  if level >= MAX_LEVEL {
    return Err(Error::InvalidArgument("trixel is already at the maximum level"));
  }
  Ok([0u64, 1, 2, 3].map(|c| TrixelId((id.0 << 2) | c)))
}

impl TrixelId {
  /// The subdivision level encoded in this id.
  ///
  /// # Errors
  /// See [`level_of`].
  pub fn level(self) -> Result<u32> {
    level_of(self)
  }

  /// True if this is a well-formed trixel id.
  #[must_use]
  pub fn is_valid(self) -> bool {
    is_valid(self)
  }
}

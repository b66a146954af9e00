//! Typed errors for the recoverable parts of arena initialization.
//!
//! Conditions that indicate corruption or caller misuse (a broken chain
//! invariant, an out-of-range payload) are raised as a `panic!`/`assert!`
//! instead of a typed error, since there is no meaningful way to recover
//! from them and propagating a `Result` would just push the decision of
//! whether to abort onto every caller.

use thiserror::Error;

pub use crate::policy::ParsePolicyError;

/// Failure constructing an [`crate::Arena`].
#[derive(Debug, Error)]
pub enum InitError {
  /// The supplied region is smaller than [`crate::MINIMUM_ARENA`].
  #[error("arena capacity {actual} is below the minimum of {minimum} bytes")]
  ArenaTooSmall { actual: usize, minimum: usize },

  /// [`crate::Arena::new_named`] was given a name that does not match
  /// any [`crate::Policy`] variant.
  #[error("unknown placement policy: {0}")]
  UnknownPolicy(#[from] ParsePolicyError),
}

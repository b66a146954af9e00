//! The public allocator handle: the concurrency envelope around the
//! free-list mutators and placement policies.

use std::marker::PhantomData;
use std::ptr::NonNull;
use std::str::FromStr;
use std::sync::Mutex;

use crate::error::InitError;
use crate::freelist::{create_block, merge_with_next, merge_with_previous, split};
use crate::header::{header_from_payload, in_bounds, BlockHeader, MINIMUM_ARENA};
use crate::policy::{best_fit, first_fit, next_fit, worst_fit, Policy};
use crate::validate::{validate_chain, walk_chain, BlockInfo};

#[derive(Debug)]
struct ArenaInner {
  base: NonNull<u8>,
  capacity: usize,
  head: NonNull<BlockHeader>,
  cursor: Option<NonNull<BlockHeader>>,
  policy: Policy,
}

// SAFETY: every access to the raw pointers in `ArenaInner` happens while
// holding `Arena::inner`'s mutex, so exclusive access is externally
// serialized regardless of which thread performs it.
unsafe impl Send for ArenaInner {}

/// A thread-safe, fixed-size, free-list heap allocator over a caller-
/// supplied byte region.
///
/// `Arena` borrows `region` for its own lifetime (no growth, no
/// ownership transfer). All public operations serialize on a single
/// internal mutex.
#[derive(Debug)]
pub struct Arena<'a> {
  inner: Mutex<ArenaInner>,
  _region: PhantomData<&'a mut [u8]>,
}

impl<'a> Arena<'a> {
  /// Binds a new arena to `region` using the given placement `policy`.
  ///
  /// # Errors
  ///
  /// Returns [`InitError::ArenaTooSmall`] if `region.len() <=
  /// `[`crate::MINIMUM_ARENA`].
  pub fn new(
    region: &'a mut [u8],
    policy: Policy,
  ) -> Result<Self, InitError> {
    let capacity = region.len();
    if capacity <= MINIMUM_ARENA {
      return Err(InitError::ArenaTooSmall {
        actual: capacity,
        minimum: MINIMUM_ARENA,
      });
    }

    let base = NonNull::new(region.as_mut_ptr()).expect("region is never null");
    let head = unsafe { create_block(base, capacity) };

    Ok(Arena {
      inner: Mutex::new(ArenaInner {
        base,
        capacity,
        head,
        cursor: None,
        policy,
      }),
      _region: PhantomData,
    })
  }

  /// Like [`Arena::new`], but parses `policy` from its name
  /// (`"FirstFit"`, `"NextFit"`, `"BestFit"`, `"WorstFit"`).
  ///
  /// An unrecognized name returns [`InitError::UnknownPolicy`] rather
  /// than terminating the process, so callers that want the stricter
  /// C-original behavior of aborting on a bad policy name can do:
  ///
  /// ```no_run
  /// # use arena_alloc::Arena;
  /// # let mut region = vec![0u8; 4096];
  /// let arena = Arena::new_named(&mut region, "FirstFit").unwrap_or_else(|e| {
  ///     log::error!("{e}");
  ///     std::process::exit(1);
  /// });
  /// ```
  pub fn new_named(
    region: &'a mut [u8],
    policy: &str,
  ) -> Result<Self, InitError> {
    let policy = Policy::from_str(policy)?;
    Self::new(region, policy)
  }

  /// Total arena capacity in bytes, fixed at construction.
  pub fn capacity(
    &self,
  ) -> usize {
    self.inner.lock().unwrap().capacity
  }

  /// The placement policy this arena was constructed with.
  pub fn policy(
    &self,
  ) -> Policy {
    self.inner.lock().unwrap().policy
  }

  /// Requests `bytes` of memory, returning the payload pointer, or
  /// `None` if no free block is large enough.
  ///
  /// # Panics
  ///
  /// Panics if `bytes == 0`.
  pub fn allocate(
    &self,
    bytes: usize,
  ) -> Option<NonNull<u8>> {
    assert!(bytes > 0, "allocate requires a non-zero byte count");

    let mut inner = self.inner.lock().unwrap();
    let candidate = match inner.policy {
      Policy::FirstFit => first_fit(inner.head, bytes),
      Policy::NextFit => next_fit(inner.head, inner.cursor, bytes),
      Policy::BestFit => best_fit(inner.head, bytes),
      Policy::WorstFit => worst_fit(inner.head, bytes),
    }?;

    let payload = unsafe { split(candidate, bytes) };

    if inner.policy == Policy::NextFit {
      inner.cursor = unsafe { candidate.as_ref().next };
    }

    Some(payload)
  }

  /// Releases a previously allocated payload back to the arena,
  /// coalescing with free neighbors.
  ///
  /// `payload = None` is a no-op, matching C's `free(NULL)`.
  /// Double-freeing an already-free block is reported via `log::warn!`
  /// and otherwise ignored; it never panics or mutates state.
  ///
  /// # Panics
  ///
  /// Panics if `payload` does not fall within this arena's region.
  /// That is a caller contract violation, not a recoverable condition.
  pub fn deallocate(
    &self,
    payload: Option<NonNull<u8>>,
  ) {
    let Some(payload) = payload else {
      return;
    };

    let mut inner = self.inner.lock().unwrap();
    assert!(
      in_bounds(payload, inner.base, inner.capacity),
      "deallocate: payload {:p} is outside the arena",
      payload
    );

    let mut block = unsafe { header_from_payload(payload) };

    if unsafe { block.as_ref().free } {
      log::warn!("double free of block at {:p}", block);
      return;
    }

    unsafe {
      block.as_mut().free = true;
    }

    if let Some(prev) = unsafe { block.as_ref().prev } {
      if unsafe { prev.as_ref().free } {
        if inner.cursor == Some(block) {
          inner.cursor = unsafe { block.as_ref().next };
        }
        block = unsafe { merge_with_previous(block) };
      }
    }

    if let Some(next) = unsafe { block.as_ref().next } {
      if unsafe { next.as_ref().free } {
        if inner.cursor == Some(next) {
          inner.cursor = unsafe { next.as_ref().next };
        }
        unsafe { merge_with_next(block) };
      }
    }
  }

  /// Walks the chain and asserts the tiling invariant. Any failure
  /// indicates corruption and is always fatal.
  pub fn validate(
    &self,
  ) {
    let inner = self.inner.lock().unwrap();
    validate_chain(inner.head, inner.capacity);
  }

  /// Enumerates every block in address order, for debugging and tests.
  pub fn blocks(
    &self,
  ) -> Vec<BlockInfo> {
    let inner = self.inner.lock().unwrap();
    walk_chain(inner.head, inner.cursor)
  }
}

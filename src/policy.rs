//! Placement policies: the four strategies for choosing which free block
//! serves an allocation request.

use std::fmt;
use std::ptr::NonNull;
use std::str::FromStr;

use thiserror::Error;

use crate::header::BlockHeader;

/// Which free block a placement search should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
  /// First free block encountered with enough room.
  FirstFit,
  /// Like first-fit, but resumes from the cursor instead of the head.
  NextFit,
  /// Smallest free block that still fits, ties broken by address order.
  BestFit,
  /// Largest free block, ties broken by address order.
  WorstFit,
}

impl fmt::Display for Policy {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    let name = match self {
      Policy::FirstFit => "FirstFit",
      Policy::NextFit => "NextFit",
      Policy::BestFit => "BestFit",
      Policy::WorstFit => "WorstFit",
    };
    f.write_str(name)
  }
}

/// Failure returned by [`Policy::from_str`] for an unrecognized name.
#[derive(Debug, Error)]
#[error("unrecognized placement policy {0:?}")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
  type Err = ParsePolicyError;

  fn from_str(
    s: &str,
  ) -> Result<Self, Self::Err> {
    match s {
      "FirstFit" => Ok(Policy::FirstFit),
      "NextFit" => Ok(Policy::NextFit),
      "BestFit" => Ok(Policy::BestFit),
      "WorstFit" => Ok(Policy::WorstFit),
      other => Err(ParsePolicyError(other.to_owned())),
    }
  }
}

/// Walks from `head`, returning the first free block with `size >= n`.
pub(crate) fn first_fit(
  head: NonNull<BlockHeader>,
  n: usize,
) -> Option<NonNull<BlockHeader>> {
  let mut current = Some(head);
  while let Some(block) = current {
    let blk = unsafe { block.as_ref() };
    if blk.free && blk.size >= n {
      return Some(block);
    }
    current = blk.next;
  }
  None
}

/// Walks from `cursor` (or `head` if unset), wrapping once, returning the
/// first free block with `size >= n`.
pub(crate) fn next_fit(
  head: NonNull<BlockHeader>,
  cursor: Option<NonNull<BlockHeader>>,
  n: usize,
) -> Option<NonNull<BlockHeader>> {
  let start = cursor.unwrap_or(head);
  let mut current = start;
  loop {
    let blk = unsafe { current.as_ref() };
    if blk.free && blk.size >= n {
      return Some(current);
    }
    current = blk.next.unwrap_or(head);
    if current == start {
      return None;
    }
  }
}

/// Walks the whole chain, returning the smallest free block with
/// `size >= n`; ties go to the first occurrence in address order.
pub(crate) fn best_fit(
  head: NonNull<BlockHeader>,
  n: usize,
) -> Option<NonNull<BlockHeader>> {
  let mut current = Some(head);
  let mut best: Option<(NonNull<BlockHeader>, usize)> = None;

  while let Some(block) = current {
    let blk = unsafe { block.as_ref() };
    if blk.free && blk.size >= n {
      match best {
        Some((_, best_size)) if blk.size >= best_size => {}
        _ => best = Some((block, blk.size)),
      }
    }
    current = blk.next;
  }

  best.map(|(block, _)| block)
}

/// Walks the whole chain, returning the largest free block with
/// `size >= n`; ties go to the first occurrence in address order.
pub(crate) fn worst_fit(
  head: NonNull<BlockHeader>,
  n: usize,
) -> Option<NonNull<BlockHeader>> {
  let mut current = Some(head);
  let mut worst: Option<(NonNull<BlockHeader>, usize)> = None;

  while let Some(block) = current {
    let blk = unsafe { block.as_ref() };
    if blk.free && blk.size >= n {
      match worst {
        Some((_, worst_size)) if blk.size <= worst_size => {}
        _ => worst = Some((block, blk.size)),
      }
    }
    current = blk.next;
  }

  worst.map(|(block, _)| block)
}

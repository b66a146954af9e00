//! # arena_alloc - A Thread-Safe Fixed-Arena Free-List Allocator
//!
//! This crate manages a single contiguous byte region supplied by the
//! caller and services variable-sized allocation and deallocation
//! requests from it using one of four placement policies: first-fit,
//! next-fit, best-fit, or worst-fit. Adjacent free blocks are coalesced
//! on release.
//!
//! ## Overview
//!
//! The arena is tiled end-to-end by a doubly-linked chain of blocks.
//! Each block is a small header immediately followed by its payload:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                         ARENA (fixed size)                   │
//!   │  ┌────────┬─────────────┐ ┌────────┬──────┐ ┌────────┬─────┐ │
//!   │  │ header │   payload   │ │ header │ free │ │ header │ ... │ │
//!   │  └────────┴─────────────┘ └────────┴──────┘ └────────┴─────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no growth and no per-thread caching; this is a single-arena
//! allocator, not a general-purpose global allocator.
//!
//! ## Crate Structure
//!
//! ```text
//!   arena_alloc
//!   ├── header    - block header layout and header/payload addressing
//!   ├── freelist  - create_block / split / merge_with_{previous,next}
//!   ├── policy    - Policy enum and the four placement searches
//!   ├── arena     - Arena: the mutex-guarded public handle
//!   ├── validate  - structural validator and the diagnostic walk
//!   └── error     - InitError / ParsePolicyError
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use arena_alloc::{Arena, Policy};
//!
//! let mut region = vec![0u8; 4096];
//! let arena = Arena::new(&mut region, Policy::FirstFit).unwrap();
//!
//! let a = arena.allocate(100).expect("arena has room");
//! arena.deallocate(Some(a));
//! arena.validate();
//! ```
//!
//! ## Safety
//!
//! The header/payload address arithmetic in `header` and the chain
//! splicing in `freelist` are the crate's only unsafe surface; every
//! public method on [`Arena`] is safe to call, and its preconditions
//! (non-zero byte counts, in-bounds payload pointers) are checked with
//! `assert!` rather than left as caller-upheld safety invariants.

mod arena;
mod error;
mod freelist;
mod header;
mod policy;
mod validate;

pub use arena::Arena;
pub use error::InitError;
pub use header::{header_size, MINIMUM_ARENA, MINIMUM_FREE_PAYLOAD};
pub use policy::{ParsePolicyError, Policy};
pub use validate::BlockInfo;

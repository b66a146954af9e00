//! Concrete allocation scenarios across the four placement policies,
//! adapted from the assertions in
//! `examples/original_source/memory_manager_test.c`'s per-algorithm
//! merge/soak tests.

use std::ptr::NonNull;

use arena_alloc::{header_size, Arena, Policy};

const ARENA_SIZE: usize = 10_000;

fn region() -> Vec<u8> {
  vec![0u8; ARENA_SIZE]
}

fn addr(
  p: NonNull<u8>,
) -> usize {
  p.as_ptr() as usize
}

#[test]
fn first_fit_single_allocation_splits_the_arena() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::FirstFit).unwrap();
  let h = header_size();

  let a = arena.allocate(100).expect("arena has room for 100 bytes");
  assert!(addr(a) > 0);

  let blocks = arena.blocks();
  assert_eq!(blocks.len(), 2);
  assert!(!blocks[0].free);
  assert_eq!(blocks[0].size, 100);
  assert!(blocks[1].free);
  assert_eq!(blocks[1].size, ARENA_SIZE - h - 100 - h);
  arena.validate();
}

#[test]
fn freeing_the_only_allocation_coalesces_to_one_block() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::FirstFit).unwrap();
  let h = header_size();

  let a = arena.allocate(100).unwrap();
  arena.deallocate(Some(a));

  let blocks = arena.blocks();
  assert_eq!(blocks.len(), 1);
  assert!(blocks[0].free);
  assert_eq!(blocks[0].size, ARENA_SIZE - h);
  arena.validate();
}

#[test]
fn next_fit_reuses_a_wrapped_around_hole() {
  // Size the arena so the tenth 64-byte allocation exhausts the chain
  // exactly (no remainder left to split off), so the cursor becomes
  // `None` afterward. A `None` cursor resolves to "start at head" on
  // the next call, i.e. wrap around.
  let h = header_size();
  let payload = 64usize;
  let n = 10usize;
  let mut tail = h + h + arena_alloc::MINIMUM_FREE_PAYLOAD - 1; // just under the split threshold
  let mut capacity = h + (n - 1) * (payload + h) + tail;
  while capacity <= arena_alloc::MINIMUM_ARENA {
    tail += 64;
    capacity = h + (n - 1) * (payload + h) + tail;
  }

  let mut buf = vec![0u8; capacity];
  let arena = Arena::new(&mut buf, Policy::NextFit).unwrap();

  let ptrs: Vec<_> = (0..n).map(|_| arena.allocate(payload).unwrap()).collect();
  assert!(
    !arena.blocks().last().unwrap().free,
    "the tenth allocation should consume the whole remaining tail"
  );

  for i in [0, 2, 4, 6, 8] {
    arena.deallocate(Some(ptrs[i]));
  }
  arena.validate();

  let reused = arena.allocate(payload).unwrap();
  assert_eq!(
    reused, ptrs[0],
    "a null cursor should resolve to list head, reusing the first hole"
  );
  arena.validate();
}

#[test]
fn best_fit_prefers_the_smallest_adequate_hole() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::BestFit).unwrap();

  let first = arena.allocate(200).unwrap();
  let middle = arena.allocate(50).unwrap();
  let _last = arena.allocate(200).unwrap();

  arena.deallocate(Some(middle));
  arena.validate();

  let forty = arena.allocate(40).unwrap();
  assert_eq!(
    forty, middle,
    "best-fit should reuse the 50-byte hole, not the tail"
  );
  assert!(addr(forty) > addr(first));
}

#[test]
fn worst_fit_prefers_the_large_tail_remainder() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::WorstFit).unwrap();

  let first = arena.allocate(100).unwrap();
  let _second = arena.allocate(100).unwrap();

  arena.deallocate(Some(first));
  arena.validate();

  let fifty = arena.allocate(50).unwrap();
  assert_ne!(
    fifty, first,
    "worst-fit should prefer the large tail remainder over the freed 100-byte hole"
  );
}

#[test]
fn policies_agree_on_a_fresh_arena() {
  let mut results = Vec::new();
  for policy in [
    Policy::FirstFit,
    Policy::NextFit,
    Policy::BestFit,
    Policy::WorstFit,
  ] {
    let mut buf = region();
    let arena = Arena::new(&mut buf, policy).unwrap();
    let p = arena.allocate(128).unwrap();
    results.push(addr(p) - buf.as_ptr() as usize);
  }
  assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn boundary_allocating_exactly_remaining_capacity_succeeds() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::FirstFit).unwrap();
  let h = header_size();
  let exact = arena.capacity() - h;

  let p = arena.allocate(exact);
  assert!(p.is_some());
  arena.validate();
}

#[test]
fn boundary_allocating_one_byte_over_capacity_fails() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::FirstFit).unwrap();
  let h = header_size();
  let too_much = arena.capacity() - h + 1;

  assert!(arena.allocate(too_much).is_none());
  arena.validate();
}

#[test]
fn boundary_small_remainder_is_not_split() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::FirstFit).unwrap();
  let h = header_size();
  // Leave a remainder smaller than h + MINIMUM_FREE_PAYLOAD.
  let requested = arena.capacity() - h - (h + arena_alloc::MINIMUM_FREE_PAYLOAD - 1);

  arena.allocate(requested).unwrap();
  let blocks = arena.blocks();
  assert_eq!(blocks.len(), 1, "remainder too small to split off");
}

#[test]
fn boundary_coalesces_both_neighbors_at_once() {
  let mut buf = region();
  let arena = Arena::new(&mut buf, Policy::FirstFit).unwrap();

  let a = arena.allocate(64).unwrap();
  let b = arena.allocate(64).unwrap();
  let c = arena.allocate(64).unwrap();

  arena.deallocate(Some(a));
  arena.deallocate(Some(c));
  arena.validate();
  let before = arena.blocks().len();

  // b is flanked by two already-free blocks; freeing it must merge
  // all three into a single block in one step.
  arena.deallocate(Some(b));
  arena.validate();
  let after = arena.blocks().len();

  assert_eq!(before - after, 2);
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

type Block = [u8; 16];

fn small() -> ArenaConfig {
    ArenaConfig {
        initial_capacity: 64,
        maximum_segment_size: 256,
    }
}

#[test]
fn test_new_arena_has_one_segment() {
    let arena: Arena<Block> = Arena::new(small());
    assert_eq!(arena.segment_count(), 1);
    assert_eq!(arena.current_capacity(), 64);
    assert_eq!(arena.size(), 0);
    assert_eq!(arena.total_bytes(), 64 + SEGMENT_HEADER);
    assert!(arena.is_empty());
}

#[test]
fn test_alloc_within_capacity() {
    let mut arena: Arena<Block> = Arena::new(small());
    for i in 0..4u8 {
        let idx = arena.alloc([i; 16]);
        assert_eq!(idx, u32::from(i));
    }
    assert_eq!(arena.segment_count(), 1);
    assert_eq!(arena.size(), 64);
    assert_eq!(arena.get(2), Some(&[2u8; 16]));
}

#[test]
fn test_growth_doubles_capacity() {
    let mut arena: Arena<Block> = Arena::new(small());
    for i in 0..5u8 {
        arena.alloc([i; 16]);
    }
    assert_eq!(arena.segment_count(), 2);
    assert_eq!(arena.current_capacity(), 128);
    assert_eq!(
        arena.total_bytes(),
        64 + SEGMENT_HEADER + 128 + SEGMENT_HEADER
    );
    // Values across the segment boundary stay addressable.
    assert_eq!(arena.get(3), Some(&[3u8; 16]));
    assert_eq!(arena.get(4), Some(&[4u8; 16]));
    assert_eq!(arena.get(5), None);
}

#[test]
fn test_growth_is_capped_at_maximum() {
    let mut arena: Arena<Block> = Arena::new(small());
    // 64 + 128 + 256 + 256 bytes of segments
    for i in 0..(4 + 8 + 16 + 1) {
        arena.alloc([u8::try_from(i % 256).unwrap(); 16]);
    }
    let caps: Vec<usize> = arena.segment_capacities().collect();
    assert_eq!(caps, vec![64, 128, 256, 256]);
}

#[test]
fn test_oversized_request_gets_exact_segment() {
    let config = ArenaConfig {
        initial_capacity: 8,
        maximum_segment_size: 8,
    };
    let mut arena: Arena<[u8; 32]> = Arena::new(config);
    arena.alloc([7; 32]);
    arena.alloc([9; 32]);
    let caps: Vec<usize> = arena.segment_capacities().collect();
    assert_eq!(caps, vec![8, 32, 32]);
    assert_eq!(arena.size(), 64);
    assert_eq!(arena.get(1), Some(&[9u8; 32]));
}

#[test]
fn test_reset_restores_initial_state() {
    let mut arena: Arena<Block> = Arena::new(small());
    for i in 0..20u8 {
        arena.alloc([i; 16]);
    }
    assert!(arena.segment_count() > 1);

    arena.reset();
    assert_eq!(arena.size(), 0);
    assert_eq!(arena.len(), 0);
    assert_eq!(arena.segment_count(), 1);
    assert_eq!(arena.current_capacity(), 64);
    assert_eq!(arena.total_bytes(), 64 + SEGMENT_HEADER);
    assert_eq!(arena.get(0), None);

    assert_eq!(arena.alloc([1; 16]), 0);
}

#[test]
fn test_iter_in_allocation_order() {
    let mut arena: Arena<u64> = Arena::new(ArenaConfig {
        initial_capacity: 16,
        maximum_segment_size: 32,
    });
    for v in 0..10u64 {
        arena.alloc(v);
    }
    let values: Vec<u64> = arena.iter().copied().collect();
    assert_eq!(values, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_values_do_not_move() {
    let mut arena: Arena<Block> = Arena::new(small());
    arena.alloc([1; 16]);
    let first = arena.get(0).unwrap() as *const Block;
    for i in 0..50u8 {
        arena.alloc([i; 16]);
    }
    assert_eq!(arena.get(0).unwrap() as *const Block, first);
}

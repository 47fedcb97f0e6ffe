use super::*;
use crate::util::{trace_init, DropCount};
use core::cell::Cell;
use std::{vec, vec::Vec};

fn collect_vals(list: &List<i32>) -> Vec<i32> {
    list.iter().copied().collect()
}

fn drain_list(list: &mut List<i32>) -> Vec<i32> {
    let mut ret = vec![];

    while let Some(val) = list.pop_back() {
        ret.push(val);
    }

    ret
}

/// Returns a cursor to the `n`th element of `list`.
fn nth(list: &List<i32>, n: usize) -> Cursor<i32> {
    let mut cursor = list.begin();
    for _ in 0..n {
        cursor = unsafe { cursor.next() };
    }
    cursor
}

mod find;

#[test]
fn send_sync() {
    crate::util::assert_send_sync::<List<i32>>();
}

#[test]
fn new_list_is_empty() {
    let _trace = trace_init();

    let list = List::<i32>::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.begin(), list.end());
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);
    list.assert_valid();
}

#[test]
fn try_new() {
    let _trace = trace_init();

    let list = List::<i32>::try_new().expect("allocating two sentinels should succeed");
    assert!(list.is_empty());
    list.assert_valid();
}

#[test]
fn push_and_drain() {
    let _trace = trace_init();

    let mut list = List::new();
    assert!(list.is_empty());

    list.push_front(5);
    assert!(!list.is_empty());
    list.assert_valid();
    list.push_front(7);
    list.assert_valid();
    list.push_front(31);
    list.assert_valid();

    let items: Vec<i32> = drain_list(&mut list);
    assert_eq!([5, 7, 31].to_vec(), items);

    list.assert_valid();
    assert!(list.is_empty());
}

#[test]
fn pop_front() {
    let _trace = trace_init();

    let mut list = List::<i32>::new();

    list.push_front(5);
    list.assert_valid();

    list.push_front(7);
    list.assert_valid();

    list.push_front(9);
    list.assert_valid();

    assert_eq!(list.pop_front(), Some(9));
    assert_eq!(list.pop_front(), Some(7));
    assert_eq!(list.pop_front(), Some(5));

    assert!(list.is_empty());
    assert!(list.pop_front().is_none());
    list.assert_valid();
}

#[test]
fn push_back() {
    let _trace = trace_init();

    let mut list = List::<i32>::new();

    list.push_back(5);
    list.assert_valid();

    list.push_back(7);
    list.assert_valid();

    list.push_back(9);
    list.assert_valid();

    assert_eq!(list.pop_back(), Some(9));
    assert_eq!(list.pop_back(), Some(7));
    assert_eq!(list.pop_back(), Some(5));

    assert!(list.is_empty());
    assert!(list.pop_back().is_none());

    list.assert_valid();
}

#[test]
fn push_pop_push_pop() {
    let _trace = trace_init();

    let mut list = List::<i32>::new();

    list.push_front(5);
    list.assert_valid();

    assert_eq!(list.pop_back(), Some(5));
    assert!(list.is_empty());
    list.assert_valid();

    list.push_front(7);
    list.assert_valid();

    assert_eq!(list.pop_back(), Some(7));
    list.assert_valid();

    assert!(list.is_empty());
    assert!(list.pop_back().is_none());
    list.assert_valid();
}

#[test]
fn push_back_then_pop_front_round_trips() {
    let _trace = trace_init();

    let mut list = List::new();
    list.push_back(42);
    assert_eq!(list.pop_front(), Some(42));
    assert!(list.is_empty());
    list.assert_valid();
}

#[test]
fn push_order() {
    let _trace = trace_init();

    let mut back = List::new();
    let mut front = List::new();
    for i in 0..8 {
        back.push_back(i);
        front.push_front(i);
    }

    assert_eq!(collect_vals(&back), (0..8).collect::<Vec<_>>());
    assert_eq!(collect_vals(&front), (0..8).rev().collect::<Vec<_>>());
    assert_eq!(back.front(), Some(&0));
    assert_eq!(back.back(), Some(&7));
}

#[test]
fn push_returns_cursor_to_new_element() {
    let _trace = trace_init();

    let mut list = List::new();
    let a = list.push_back(1);
    let b = list.push_front(0);

    unsafe {
        assert_eq!(list.get(a), Some(&1));
        assert_eq!(list.get(b), Some(&0));
        assert_eq!(b.next(), a);
        assert_eq!(a.prev(), b);
        assert_eq!(a.next(), list.end());
    }
}

#[test]
fn insert_after_leading_sentinel() {
    let _trace = trace_init();

    let mut list: List<i32> = [2, 3].into_iter().collect();
    unsafe {
        let head = list.begin().prev();
        let one = list.insert_after(head, 1);
        assert_eq!(list.begin(), one);
    }
    assert_eq!(collect_vals(&list), [1, 2, 3]);
    list.assert_valid();
}

#[test]
#[should_panic]
fn insert_after_end_panics() {
    let mut list = List::<i32>::new();
    let end = list.end();
    unsafe {
        let _ = list.insert_after(end, 1);
    }
}

#[test]
fn sentinels_hold_no_data() {
    let _trace = trace_init();

    let mut list: List<i32> = [1].into_iter().collect();
    unsafe {
        let end = list.end();
        let head = list.begin().prev();
        assert_eq!(list.get(end), None);
        assert_eq!(list.get(head), None);
        assert_eq!(list.get_mut(end), None);
    }
}

#[test]
fn get_mut() {
    let _trace = trace_init();

    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    unsafe {
        let two = nth(&list, 1);
        *list.get_mut(two).unwrap() *= 10;
    }
    assert_eq!(collect_vals(&list), [1, 20, 3]);
}

#[test]
fn erase_returns_next() {
    let _trace = trace_init();

    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    unsafe {
        let two = nth(&list, 1);
        let three = list.erase(two);
        assert_eq!(list.get(three), Some(&3));
        list.assert_valid();

        let end = list.erase(three);
        assert_eq!(end, list.end());
        list.assert_valid();
    }
    assert_eq!(collect_vals(&list), [1]);
    assert_eq!(list.len(), 1);
}

#[test]
fn remove_returns_value() {
    let _trace = trace_init();

    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    unsafe {
        let begin = list.begin();
        let (val, next) = list.remove(begin);
        assert_eq!(val, 1);
        assert_eq!(next, list.begin());
    }
    assert_eq!(collect_vals(&list), [2, 3]);
    list.assert_valid();
}

#[test]
#[should_panic]
fn erase_end_panics() {
    let mut list = List::<i32>::new();
    let end = list.end();
    unsafe {
        let _ = list.erase(end);
    }
}

#[test]
fn double_ended_iter() {
    let list: List<i32> = [1, 2, 3].into_iter().collect();

    let head_to_tail = list.iter().copied().collect::<Vec<_>>();
    assert_eq!(&head_to_tail, &[1, 2, 3]);

    let tail_to_head = list.iter().rev().copied().collect::<Vec<_>>();
    assert_eq!(&tail_to_head, &[3, 2, 1]);
}

/// Per the double-ended iterator docs:
///
/// > It is important to note that both back and forth work on the same range,
/// > and do not cross: iteration is over when they meet in the middle.
#[test]
fn double_ended_iter_empties() {
    let list: List<i32> = [1, 2, 3, 4].into_iter().collect();

    let mut iter = list.iter();

    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next(), Some(&2));

    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next_back(), Some(&3));

    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn iter_mut() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    for val in &mut list {
        *val += 1;
    }
    assert_eq!(collect_vals(&list), [2, 3, 4]);
}

#[test]
fn into_iter() {
    let list: List<i32> = [1, 2, 3, 4].into_iter().collect();
    let mut iter = list.into_iter();
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
}

#[test]
fn append() {
    let _trace = trace_init();

    let mut a: List<i32> = [1, 2].into_iter().collect();
    let mut b: List<i32> = [3, 4].into_iter().collect();
    let mut empty = List::new();

    a.append(&mut empty);
    assert_eq!(collect_vals(&a), [1, 2]);

    a.append(&mut b);
    assert_eq!(collect_vals(&a), [1, 2, 3, 4]);
    assert!(b.is_empty());
    a.assert_valid();
    b.assert_valid();

    // `b` is still usable.
    b.push_back(5);
    assert_eq!(collect_vals(&b), [5]);
}

#[test]
fn debug() {
    let list: List<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(std::format!("{:?}", list), "[1, 2, 3]");
}

#[test]
fn drop_drops_every_element() {
    let _trace = trace_init();
    let drops = Cell::new(0);

    {
        let mut list = List::new();
        for i in 0..5 {
            list.push_back(DropCount::new(i, &drops));
        }

        unsafe {
            let begin = list.begin();
            let _ = list.erase(begin);
        }
        assert_eq!(drops.get(), 1);

        let popped = list.pop_back();
        assert_eq!(popped.as_ref().map(|d| d.val), Some(4));
        drop(popped);
        assert_eq!(drops.get(), 2);
    }

    assert_eq!(drops.get(), 5);
}

#[test]
fn moving_the_list_keeps_cursors_valid() {
    let _trace = trace_init();

    let mut list = List::new();
    let one = list.push_back(1);
    let end = list.end();

    let moved = list;
    assert_eq!(moved.end(), end);
    assert_eq!(unsafe { moved.get(one) }, Some(&1));
    moved.assert_valid();
}

#[derive(Debug)]
enum Op {
    PushFront,
    PopBack,
    PushBack,
    PopFront,
    Erase(usize),
    InsertBefore(usize),
}

use core::ops::Range;
use proptest::collection::vec;
use proptest::num::usize::ANY;

/// Miri uses a significant amount of time and memory, so keep the number of
/// operations per case small when running under it.
#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

/// The default range for proptest's vec strategy is 0..100.
#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..100;

proptest::proptest! {
    #[test]
    fn fuzz_list(ops in vec(ANY, FUZZ_RANGE)) {
        let ops = ops
            .iter()
            .map(|i| match i % 6 {
                0 => Op::PushFront,
                1 => Op::PopBack,
                2 => Op::PushBack,
                3 => Op::PopFront,
                4 => Op::Erase(i / 6),
                5 => Op::InsertBefore(i / 6),
                _ => unreachable!(),
            })
            .collect::<Vec<_>>();

        let _trace = trace_init();
        let _span = tracing::info_span!("fuzz").entered();
        tracing::info!(?ops);
        run_fuzz(ops);
    }
}

fn run_fuzz(ops: Vec<Op>) {
    use std::collections::VecDeque;

    let mut list = List::<i32>::new();
    let mut reference = VecDeque::new();
    let mut pushes = 0;
    let mut pops = 0;

    for (i, op) in ops.iter().enumerate() {
        let _span = tracing::info_span!("op", ?i, ?op).entered();
        tracing::info!(?op);
        let val = i as i32;
        match op {
            Op::PushFront => {
                reference.push_front(val);
                list.push_front(val);
                pushes += 1;
            }
            Op::PushBack => {
                reference.push_back(val);
                list.push_back(val);
                pushes += 1;
            }
            Op::PopBack => {
                if reference.is_empty() {
                    assert!(list.is_empty());
                    assert_eq!(list.pop_back(), None);
                    tracing::debug!("skipping pop; list is empty");
                    continue;
                }

                assert_eq!(reference.pop_back(), list.pop_back());
                pops += 1;
            }
            Op::PopFront => {
                if reference.is_empty() {
                    assert!(list.is_empty());
                    assert_eq!(list.pop_front(), None);
                    tracing::debug!("skipping pop: list is empty");
                    continue;
                }

                assert_eq!(reference.pop_front(), list.pop_front());
                pops += 1;
            }
            Op::Erase(n) => {
                if reference.is_empty() {
                    assert!(list.is_empty());
                    tracing::debug!("skipping erase; list is empty");
                    continue;
                }

                let idx = n % reference.len();
                let expect = reference.remove(idx).unwrap();
                let cursor = nth(&list, idx);
                let (val, _) = unsafe { list.remove(cursor) };
                assert_eq!(expect, val);
                pops += 1;
            }
            Op::InsertBefore(n) => {
                // Inserting before the end is allowed, so the index may be one
                // past the last element.
                let idx = n % (reference.len() + 1);
                reference.insert(idx, val);
                let cursor = nth(&list, idx);
                let new = unsafe { list.insert_before(cursor, val) };
                assert_eq!(unsafe { list.get(new) }, Some(&val));
                pushes += 1;
            }
        }

        list.assert_valid();
        assert_eq!(list.len(), reference.len());
        assert_eq!(list.len(), pushes - pops);
        assert_eq!(list.is_empty(), list.len() == 0);
        assert!(list.iter().eq(reference.iter()));
    }
}

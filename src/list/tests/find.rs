use super::*;
use core::ops::ControlFlow;

#[test]
fn find_first_match() {
    let _trace = trace_init();

    let list: List<i32> = [1, 2, 3, 4, 3].into_iter().collect();
    unsafe {
        let found = list.find(list.begin(), list.end(), |&x| x == 3);
        assert_eq!(found, nth(&list, 2));
        assert_eq!(list.get(found), Some(&3));
    }
}

#[test]
fn find_missing_returns_to() {
    let _trace = trace_init();

    let list: List<i32> = [1, 2, 3].into_iter().collect();
    unsafe {
        assert_eq!(list.find(list.begin(), list.end(), |&x| x == 9), list.end());

        // The range is half-open: `to` itself is never tested.
        let three = nth(&list, 2);
        assert_eq!(list.find(list.begin(), three, |&x| x == 3), three);
    }
}

#[test]
fn find_with_captured_needle_and_context() {
    let _trace = trace_init();

    let list: List<i32> = [10, 20, 30].into_iter().collect();
    let needle = 20;
    let mut visited = 0;
    unsafe {
        let found = list.find(list.begin(), list.end(), |&x| {
            visited += 1;
            x == needle
        });
        assert_eq!(list.get(found), Some(&20));
    }
    assert_eq!(visited, 2);
}

#[test]
fn find_in_empty_range() {
    let list: List<i32> = [1].into_iter().collect();
    unsafe {
        let begin = list.begin();
        assert_eq!(list.find(begin, begin, |_| true), begin);
    }
}

#[test]
fn for_each_visits_range_in_order() {
    let _trace = trace_init();

    let mut list: List<i32> = [1, 2, 3, 4].into_iter().collect();
    let mut seen = vec![];
    unsafe {
        let from = nth(&list, 1);
        let end = list.end();
        let result = list.for_each(from, end, |x| {
            seen.push(*x);
            *x *= 2;
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(result, ControlFlow::Continue(()));
    }
    assert_eq!(seen, [2, 3, 4]);
    assert_eq!(collect_vals(&list), [1, 4, 6, 8]);
}

#[test]
fn for_each_short_circuits() {
    let _trace = trace_init();

    let mut list: List<i32> = [1, 2, 3, 4].into_iter().collect();
    let mut calls = 0;
    let result = unsafe {
        let (begin, end) = (list.begin(), list.end());
        list.for_each(begin, end, |x| {
            calls += 1;
            if *x == 2 {
                ControlFlow::Break("found two")
            } else {
                ControlFlow::Continue(())
            }
        })
    };
    assert_eq!(result, ControlFlow::Break("found two"));
    assert_eq!(calls, 2);
}

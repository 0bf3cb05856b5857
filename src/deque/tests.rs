use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use proptest::prelude::*;

use super::*;
use crate::allocator::counting::Counting;

fn hash_of<H: Hash>(value: &H) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn simple() {
    let mut tester = Deque::with_capacity(8);
    assert_eq!(tester.capacity(), 8);
    assert_eq!(tester.len(), 0);

    tester.push_back(1);
    tester.push_back(2);
    tester.push_back(3);
    tester.push_back(4);
    assert_eq!(tester.len(), 4);

    assert_eq!(tester.pop_front(), Ok(1));
    assert_eq!(tester.pop_front(), Ok(2));
    assert_eq!(tester.len(), 2);
    assert_eq!(tester.pop_front(), Ok(3));
    assert_eq!(tester.pop_front(), Ok(4));
    assert_eq!(tester.pop_front(), Err(Error::EmptyQueue));
}

#[test]
fn simple_reversely() {
    let mut tester = Deque::with_capacity(8);
    tester.push_front(1);
    tester.push_front(2);
    tester.push_front(3);
    tester.push_front(4);
    assert_eq!(tester.len(), 4);
    assert_eq!(tester.pop_back(), Ok(1));
    assert_eq!(tester.pop_back(), Ok(2));
    assert_eq!(tester.len(), 2);
    assert_eq!(tester.pop_back(), Ok(3));
    assert_eq!(tester.pop_back(), Ok(4));
    assert_eq!(tester.pop_back(), Err(Error::EmptyQueue));
}

#[test]
fn empty_access_fails() {
    let mut tester: Deque<i32> = Deque::new();
    assert_eq!(tester.front(), Err(Error::EmptyQueue));
    assert_eq!(tester.back(), Err(Error::EmptyQueue));
    assert_eq!(tester.front_mut(), Err(Error::EmptyQueue));
    assert_eq!(tester.back_mut(), Err(Error::EmptyQueue));
    assert!(tester.is_empty());
}

#[test]
fn growth_doubles_and_keeps_order() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(2);
    tester.push_front(1);
    tester.push_back(3);
    assert_eq!(tester.capacity(), 4);

    // the fourth element fills the ring and triggers the doubling
    tester.push_front(0);
    assert_eq!(tester.capacity(), 8);
    assert_eq!(tester, vec![0, 1, 2, 3]);
    assert_eq!(tester.as_slices(), (&[0, 1, 2, 3][..], &[][..]));

    for i in 4..100 {
        tester.push_back(i);
    }
    assert_eq!(tester.capacity(), 128);
    assert!(tester.iter().copied().eq(0..100));
}

#[test]
fn zero_capacity_is_clamped() {
    let mut tester = Deque::with_capacity(0);
    assert_eq!(tester.capacity(), 1);
    tester.push_back('a');
    assert_eq!(tester.capacity(), 2);
    assert_eq!(tester.front(), Ok(&'a'));
}

#[test]
fn index_and_at() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(1);
    tester.push_back(2);
    tester.push_back(3);
    assert_eq!(tester[0], 1);
    // pop_front 1 <- [2, 3]
    assert_eq!(tester.pop_front(), Ok(1));
    assert_eq!(tester[0], 2);
    // push_front 0 -> [0, 2, 3]
    tester.push_front(0);
    assert_eq!(tester[0], 0);
    tester[1] = 5;
    assert_eq!(tester.at(1), Ok(&5));
    assert_eq!(tester.at(3), Err(Error::IndexOutOfRange { index: 3, bound: 3 }));
    *tester.at_mut(2).unwrap() += 10;
    assert_eq!(tester, vec![0, 5, 13]);
    assert!(tester.at_mut(7).is_err());
    assert_eq!(tester.get(3), None);
}

#[test]
fn unchecked_index_reads_stale_slot() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(7);
    tester.push_back(8);
    tester.pop_back().unwrap();
    // the slot past the back is still inside the ring
    assert_eq!(tester[1], 0);
}

#[test]
fn insert_and_erase_through_cursor() {
    let mut tester: Deque<_> = vec![1, 2, 3, 4, 5].into();
    let index = (tester.begin() + 2).index();
    tester.insert(index, 99).unwrap();
    assert_eq!(tester, vec![1, 2, 99, 3, 4, 5]);
    assert_eq!(tester.len(), 6);

    tester.erase_at(2).unwrap();
    assert_eq!(tester, vec![1, 2, 3, 4, 5]);
}

#[test]
fn insert_bounds() {
    let mut tester: Deque<_> = vec![1, 2].into();
    tester.insert(2, 3).unwrap();
    tester.insert(0, 0).unwrap();
    assert_eq!(tester, vec![0, 1, 2, 3]);
    assert_eq!(tester.insert(5, 9), Err(Error::IndexOutOfRange { index: 5, bound: 4 }));
    assert_eq!(tester.erase_at(4), Err(Error::IndexOutOfRange { index: 4, bound: 4 }));
    assert_eq!(tester.remove(4), Err(Error::IndexOutOfRange { index: 4, bound: 4 }));
}

#[test]
fn insert_grows_when_full() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(1);
    tester.push_back(3);
    tester.push_back(4);
    tester.insert(1, 2).unwrap();
    assert_eq!(tester.capacity(), 8);
    assert_eq!(tester, vec![1, 2, 3, 4]);
}

#[test]
fn erase_ranges() {
    let mut tester: Deque<_> = (0..10).collect();
    tester.erase(..2).unwrap();
    assert_eq!(tester, vec![2, 3, 4, 5, 6, 7, 8, 9]);
    tester.erase(6..).unwrap();
    assert_eq!(tester, vec![2, 3, 4, 5, 6, 7]);
    tester.erase(1..4).unwrap();
    assert_eq!(tester, vec![2, 6, 7]);
    tester.erase(1..1).unwrap();
    assert_eq!(tester.len(), 3);
    assert!(tester.erase(0..4).is_err());
    tester.erase(..).unwrap();
    assert!(tester.is_empty());
}

#[test]
fn remove_returns_element() {
    let mut tester = Deque::with_capacity(8);
    for v in ["b", "c", "d"] {
        tester.push_back(v.to_string());
    }
    tester.push_front("a".to_string());
    assert_eq!(tester.remove(2).unwrap(), "c");
    assert_eq!(tester, vec!["a", "b", "d"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>());
}

#[test]
fn resize_and_assign() {
    let mut tester: Deque<u8> = Deque::with_capacity(2);
    tester.resize(5, 9);
    assert_eq!(tester, vec![9, 9, 9, 9, 9]);
    assert!(tester.capacity() > tester.len());

    tester.resize(2, 0);
    assert_eq!(tester, vec![9, 9]);
    tester.resize_default(4);
    assert_eq!(tester, vec![9, 9, 0, 0]);

    let capacity = tester.capacity();
    tester.assign(vec![1, 2, 3]);
    assert_eq!(tester, vec![1, 2, 3]);
    assert_eq!(tester.capacity(), capacity);
}

#[test]
fn reserve_renormalizes() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(2);
    tester.push_back(3);
    tester.push_front(1);
    assert_eq!(tester.as_slices(), (&[1][..], &[2, 3][..]));

    tester.reserve(16);
    assert_eq!(tester.capacity(), 16);
    assert_eq!(tester.as_slices(), (&[1, 2, 3][..], &[][..]));
    tester.reserve(3);
    assert_eq!(tester.capacity(), 16);
}

#[test]
fn cursor_index_survives_reserve() {
    let mut tester: Deque<i32> = Deque::with_capacity(4);
    tester.push_back(1);
    let before = tester.begin().index();
    tester.reserve(64);
    let after = tester.begin();
    assert_eq!(before, after.index());
    assert_eq!(*after, 1);
}

#[test]
fn clear_keeps_storage() {
    let mut tester: Deque<_> = (0..5).collect();
    let capacity = tester.capacity();
    tester.clear();
    assert!(tester.is_empty());
    assert_eq!(tester.capacity(), capacity);
    tester.push_front(1);
    assert_eq!(tester, vec![1]);
}

#[test]
fn iter_and_iter_mut() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(2);
    tester.push_back(3);
    tester.push_front(1);
    {
        let mut iter = tester.iter();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.next(), Some(&1));
        let mut clone = iter.clone();
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(clone.next(), Some(&2));
    }

    for v in tester.iter_mut() {
        *v *= 10;
    }
    for v in &mut tester {
        *v += 1;
    }
    assert_eq!((&tester).into_iter().copied().collect::<Vec<_>>(), vec![11, 21, 31]);
    assert_eq!(tester.iter_mut().rev().map(|v| *v).collect::<Vec<_>>(), vec![31, 21, 11]);
}

#[test]
fn into_iter_both_ends() {
    let tester: Deque<_> = (1..6).collect();
    let mut iter = tester.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3, 4]);
}

#[test]
fn construction() {
    let from_vec: Deque<_> = vec![1, 2, 3].into();
    assert_eq!(from_vec.capacity(), 6);
    let from_array = Deque::from([1, 2, 3]);
    assert_eq!(from_array, from_vec);
    let collected: Deque<i32> = std::iter::empty().collect();
    assert_eq!(collected.capacity(), 1);

    let mut extended: Deque<i32> = Deque::with_capacity(1);
    extended.extend(&[1, 2]);
    extended.extend(vec![3]);
    assert_eq!(extended, from_vec);
    assert_eq!(Deque::<u8>::default().capacity(), crate::DEFAULT_CAPACITY);
}

#[test]
fn clone_is_independent() {
    let mut tester = Deque::with_capacity(4);
    tester.push_back(2);
    tester.push_front(1);
    let mut copy = tester.clone();
    assert_eq!(copy, tester);
    assert_eq!(copy.capacity(), tester.capacity());
    copy.push_back(3);
    assert_eq!(tester, vec![1, 2]);

    let mut target: Deque<i32> = Deque::with_capacity(1);
    target.clone_from(&copy);
    assert_eq!(target, vec![1, 2, 3]);
}

#[test]
fn equality_ignores_layout() {
    // [2 3 . 1] vs [1 2 3 . . .]
    let mut a = Deque::with_capacity(4);
    a.push_back(2);
    a.push_back(3);
    a.push_front(1);
    let b: Deque<_> = vec![1, 2, 3].into();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a, &[1, 2, 3][..]);

    let c: Deque<_> = vec![1, 2, 4].into();
    assert!(a < c);
    assert_eq!(a.cmp(&c), std::cmp::Ordering::Less);
    assert!(a.contains(&3));
    assert!(!a.contains(&4));
}

#[test]
fn formatting() {
    let tester: Deque<_> = vec![1, 2, 3].into();
    assert_eq!(tester.to_string(), "[ 1 2 3 ]");
    assert_eq!(format!("{:?}", tester), "[1, 2, 3]");
    assert_eq!(Deque::<i32>::new().to_string(), "[ ]");
}

#[test]
fn removed_elements_are_dropped() {
    let shared = Rc::new(());
    let filled = |n: usize| -> Deque<Option<Rc<()>>> {
        let mut tester = Deque::with_capacity(8);
        // start near the seam so removals cross it
        for _ in 0..6 {
            tester.push_back(None);
            tester.pop_front().unwrap();
        }
        for _ in 0..n {
            tester.push_back(Some(Rc::clone(&shared)));
        }
        tester
    };

    let mut tester = filled(4);
    assert_eq!(Rc::strong_count(&shared), 5);
    tester.erase(1..3).unwrap();
    assert_eq!(Rc::strong_count(&shared), 3);
    tester.erase_at(0).unwrap();
    assert_eq!(Rc::strong_count(&shared), 2);
    tester.clear();
    assert_eq!(Rc::strong_count(&shared), 1);
    assert_eq!(tester.capacity(), 8);

    let mut tester = filled(4);
    tester.resize(1, None);
    assert_eq!(Rc::strong_count(&shared), 2);
    tester.resize_default(0);
    assert_eq!(Rc::strong_count(&shared), 1);

    let mut tester = filled(3);
    assert!(tester.remove(1).unwrap().is_some());
    assert_eq!(Rc::strong_count(&shared), 3);
    tester.assign(std::iter::empty());
    assert_eq!(Rc::strong_count(&shared), 1);
}

#[test]
fn allocator_sees_every_release_once() {
    let alloc = Counting::default();
    {
        let mut tester = Deque::with_capacity_in(2, alloc.clone());
        for i in 0..20 {
            tester.push_back(i);
        }
        // 2 -> 4 -> 8 -> 16 -> 32
        assert_eq!(alloc.allocated.get(), 5);
        assert_eq!(alloc.released.get(), 4);
        assert_eq!(alloc.slots.get(), 32);

        let copy = tester.clone();
        assert_eq!(alloc.allocated.get(), 6);
        drop(copy);
    }
    assert_eq!(alloc.allocated.get(), alloc.released.get());
    assert_eq!(alloc.slots.get(), 0);
}

#[derive(Debug, Clone)]
enum Op {
    PushBack(u16),
    PushFront(u16),
    PopBack,
    PopFront,
    Insert(usize, u16),
    Erase(usize, usize),
    Reserve(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u16>().prop_map(Op::PushBack),
        any::<u16>().prop_map(Op::PushFront),
        Just(Op::PopBack),
        Just(Op::PopFront),
        (any::<usize>(), any::<u16>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Erase(a, b)),
        (0usize..64).prop_map(Op::Reserve),
    ]
}

proptest! {
    /// Every operation agrees with `VecDeque`, and a free slot always
    /// remains.
    #[test]
    fn matches_vecdeque(capacity in 1usize..8,
                        ops in proptest::collection::vec(op_strategy(), 0..300)) {
        let mut deque = Deque::with_capacity(capacity);
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    deque.push_back(v);
                    model.push_back(v);
                }
                Op::PushFront(v) => {
                    deque.push_front(v);
                    model.push_front(v);
                }
                Op::PopBack => {
                    prop_assert_eq!(deque.pop_back().ok(), model.pop_back());
                }
                Op::PopFront => {
                    prop_assert_eq!(deque.pop_front().ok(), model.pop_front());
                }
                Op::Insert(i, v) => {
                    let index = i % (model.len() + 1);
                    deque.insert(index, v).unwrap();
                    model.insert(index, v);
                }
                Op::Erase(a, b) => {
                    let a = a % (model.len() + 1);
                    let b = b % (model.len() + 1);
                    let (start, end) = if a <= b { (a, b) } else { (b, a) };
                    deque.erase(start..end).unwrap();
                    model.drain(start..end);
                }
                Op::Reserve(n) => deque.reserve(n),
            }
            prop_assert!(deque.len() < deque.capacity());
            prop_assert_eq!(deque.len(), model.len());
            prop_assert!(deque.iter().eq(model.iter()));
            prop_assert_eq!(deque.front().ok(), model.front());
            prop_assert_eq!(deque.back().ok(), model.back());
        }
    }
}

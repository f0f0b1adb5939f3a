//! Randomized checks of `Sequence` against a `Vec` model.
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::iter::FromIterator;

use crate::Sequence;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn to_vec(seq: &Sequence<u8>) -> Vec<u8> {
    seq.iter().copied().collect()
}

#[quickcheck]
fn round_trip(xs: Vec<u8>) -> bool {
    let seq = Sequence::from_iter(xs.iter().copied());
    to_vec(&seq) == xs
        && seq.iter().rev().copied().eq(xs.iter().rev().copied())
        && seq.len() == xs.len()
        && seq.is_materialized() == !xs.is_empty()
}

#[quickcheck]
fn model_check(cmds: Vec<u8>) -> TestResult {
    init_logger();
    if cmds.is_empty() {
        return TestResult::discard();
    }
    let mut cmds = cmds.into_iter();
    let mut seq = Sequence::new();
    let mut model = Vec::new();

    while let Some(cmd) = cmds.next() {
        let arg = cmds.next().unwrap_or(0);
        match cmd % 10 {
            0 => {
                seq.push_back(arg);
                model.push(arg);
            }
            1 => {
                seq.push_front(arg);
                model.insert(0, arg);
            }
            2 => {
                if seq.pop_back() != model.pop() {
                    return TestResult::failed();
                }
            }
            3 => {
                let expected = if model.is_empty() {
                    None
                } else {
                    Some(model.remove(0))
                };
                if seq.pop_front() != expected {
                    return TestResult::failed();
                }
            }
            4 => {
                let at = arg as usize % (model.len() + 1);
                let pos = seq.insert(seq.cursor(at), arg);
                model.insert(at, arg);
                if seq[pos] != arg {
                    return TestResult::failed();
                }
            }
            5 if !model.is_empty() => {
                let at = arg as usize % model.len();
                let next = seq.erase(seq.cursor(at));
                model.remove(at);
                if seq.get(next) != model.get(at) {
                    return TestResult::failed();
                }
            }
            6 => {
                seq.remove(&(arg % 4));
                model.retain(|x| *x != arg % 4);
            }
            7 => {
                seq.resize((arg % 8) as usize, arg);
                model.resize((arg % 8) as usize, arg);
            }
            8 => {
                seq.clear();
                model.clear();
                if seq.is_materialized() {
                    return TestResult::failed();
                }
            }
            _ => {
                let n = (arg % 3) as usize;
                let at = arg as usize % (model.len() + 1);
                seq.insert_n(seq.cursor(at), n, arg);
                model.splice(at..at, std::iter::repeat(arg).take(n));
            }
        }
        if to_vec(&seq) != model || seq.len() != model.len() {
            return TestResult::failed();
        }
        if seq.front() != model.first() || seq.back() != model.last() {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn copy_independence(xs: Vec<u8>, x: u8) -> bool {
    let original = Sequence::from(xs.clone());
    let mut copy = original.clone();
    copy.push_back(x);
    copy.pop_front();
    let mut again = copy.clone();
    again.clear();
    to_vec(&original) == xs && copy.len() == xs.len() && !again.is_materialized()
}

#[quickcheck]
fn move_transfers(xs: Vec<u8>) -> bool {
    let mut source = Sequence::from(xs.clone());
    let target = std::mem::take(&mut source);
    to_vec(&target) == xs && !source.is_materialized() && source.begin() == source.end()
}

#[quickcheck]
fn unique_keeps_first_occurrences(xs: Vec<u8>) -> bool {
    let xs: Vec<u8> = xs.into_iter().map(|x| x % 8).collect();
    let mut seq = Sequence::from(xs.clone());
    seq.unique();
    let mut expected: Vec<u8> = Vec::new();
    for x in xs {
        if !expected.contains(&x) {
            expected.push(x);
        }
    }
    to_vec(&seq) == expected
}

#[quickcheck]
fn remove_removes_all(xs: Vec<u8>, x: u8) -> bool {
    let xs: Vec<u8> = xs.into_iter().map(|x| x % 4).collect();
    let x = x % 4;
    let mut seq = Sequence::from(xs.clone());
    let removed = seq.remove(&x);
    removed == xs.iter().filter(|&&y| y == x).count()
        && !seq.contains(&x)
        && to_vec(&seq) == xs.into_iter().filter(|&y| y != x).collect::<Vec<_>>()
}

#[quickcheck]
fn ordering_matches_slices(xs: Vec<u8>, ys: Vec<u8>) -> bool {
    let (a, b) = (Sequence::from(xs.clone()), Sequence::from(ys.clone()));
    a.cmp(&b) == xs.cmp(&ys) && (a == b) == (xs == ys)
}

#[quickcheck]
fn clear_twice(xs: Vec<u8>) -> bool {
    let mut seq = Sequence::from(xs);
    seq.clear();
    let first = !seq.is_materialized() && seq.is_empty();
    seq.clear();
    first && !seq.is_materialized() && seq.is_empty()
}

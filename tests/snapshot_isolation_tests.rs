//! Concurrency tests for AvlTree.
//!
//! One writer thread publishes versions while reader threads load and walk
//! snapshots without any locking. Readers must always see a complete,
//! ordered, balanced tree, and a snapshot must never change after it was
//! loaded.

#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use rstest::rstest;
use snaptree::tree::{AvlTree, Key, Snapshot};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn keys_of<V>(snapshot: &Snapshot<V>) -> Vec<Key> {
    let mut keys = Vec::with_capacity(snapshot.len());
    snapshot.traverse(|key, _| {
        keys.push(key);
        true
    });
    keys
}

/// Writer inserts 0..10000 while a reader polls until it observes every key.
#[rstest]
fn test_survives_concurrent_reader() {
    const COUNT: Key = 10_000;
    let tree = Arc::new(AvlTree::new());

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || {
            for key in 0..COUNT {
                tree.insert(key, key.to_string());
            }
        })
    };

    let result = loop {
        let snapshot = tree.root();
        let mut keys = Vec::new();
        snapshot.traverse(|key, value| {
            // touch the counters while walking
            let _ = tree.stats();
            assert_eq!(value, &key.to_string());
            keys.push(key);
            true
        });
        if keys.len() == COUNT as usize {
            break keys;
        }
        thread::yield_now();
    };

    writer.join().expect("writer panicked");
    assert_eq!(result, (0..COUNT).collect::<Vec<_>>());
}

#[rstest]
fn test_readers_always_see_consistent_versions() {
    let tree = Arc::new(AvlTree::new());
    let done = Arc::new(AtomicBool::new(false));
    let start = Arc::new(Barrier::new(5));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let tree = Arc::clone(&tree);
            let done = Arc::clone(&done);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                let mut observed = 0_usize;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    let snapshot = tree.root();
                    let keys = keys_of(&snapshot);

                    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
                    // counters are published with the root they describe
                    assert_eq!(keys.len(), snapshot.len());
                    assert_eq!(snapshot.validate(), Ok(()));
                    observed += 1;
                    if finished {
                        break observed;
                    }
                }
            })
        })
        .collect();

    start.wait();
    for key in 0..2_000 {
        tree.insert(key * 7 % 2_003, key);
        if key % 3 == 0 {
            tree.drop_minimum();
        }
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().expect("reader panicked") > 0);
    }
    assert_eq!(tree.root().validate(), Ok(()));
}

#[rstest]
fn test_held_snapshot_is_unaffected_by_concurrent_writes() {
    let tree = Arc::new(AvlTree::new());
    for key in 0..100 {
        tree.insert(key, key);
    }
    let held = tree.root();
    let expected = keys_of(&held);

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || {
            for key in 100..5_000 {
                tree.insert(key, key);
                if key % 2 == 0 {
                    tree.drop_minimum();
                }
            }
        })
    };

    // walk the held snapshot repeatedly while the writer runs
    for _ in 0..50 {
        assert_eq!(keys_of(&held), expected);
        assert_eq!(held.stats().added(), 100);
        assert_eq!(held.get(0), Some(&0));
    }

    writer.join().expect("writer panicked");
    assert_eq!(keys_of(&held), expected);
    assert_eq!(tree.root().get(0), None);
}

#[rstest]
fn test_load_after_write_observes_write() {
    let tree = Arc::new(AvlTree::new());
    let (sender, receiver) = std::sync::mpsc::channel();

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || {
            for key in 0..500 {
                tree.insert(key, key * 2);
                sender.send(key).expect("receiver dropped");
            }
        })
    };

    for key in receiver {
        assert_eq!(tree.root().get(key), Some(&(key * 2)));
    }
    writer.join().expect("writer panicked");
}

#[rstest]
fn test_snapshots_cross_threads() {
    let tree = AvlTree::new();
    for key in [9, 7, 11, 4, 8, 1] {
        tree.insert(key, key.to_string());
    }
    let snapshot = tree.root();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let snapshot = snapshot.clone();
            thread::spawn(move || (keys_of(&snapshot), snapshot.depth_of(1)))
        })
        .collect();

    for handle in handles {
        let (keys, depth) = handle.join().expect("reader panicked");
        assert_eq!(keys, vec![1, 4, 7, 8, 9, 11]);
        assert_eq!(depth, 3);
    }
}

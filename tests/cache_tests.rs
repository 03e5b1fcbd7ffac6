use std::cell::RefCell;
use std::rc::Rc;

use duocache::{CacheError, DuoCache};

#[test]
fn test_insert_and_get() {
    let mut cache = DuoCache::new(10).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2);

    assert_eq!(cache.get(&"a"), Some(&1));
    assert_eq!(cache.get(&"b"), Some(&2));
    assert_eq!(cache.get(&"c"), None);
}

#[test]
fn test_insert_overwrites_in_place() {
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert("a", 1);
    cache.insert("a", 2);
    cache.insert("a", 3);

    // Updates are not inserts: the rotation window never fills.
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&"a"), Some(&3));
}

#[test]
fn test_len_never_exceeds_capacity() {
    let mut cache = DuoCache::new(5).unwrap();
    for i in 0..100 {
        cache.insert(i, i);
        assert!(cache.len() <= 5, "len {} exceeded capacity", cache.len());
    }
}

#[test]
fn test_recency_approximation_scenario() {
    // A key read between rotations keeps surviving, capacity 2:
    // set 1, set 2, get 1, set 3, get 1, set 4, get 1 => 1 still present.
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert(1, 1);
    cache.insert(2, 2);
    assert_eq!(cache.get(&1), Some(&1));
    cache.insert(3, 3);
    assert_eq!(cache.get(&1), Some(&1));
    cache.insert(4, 4);
    assert_eq!(cache.get(&1), Some(&1));
    assert!(cache.contains_key(&1));
}

#[test]
fn test_untouched_keys_eventually_evicted() {
    let mut cache = DuoCache::new(4).unwrap();
    cache.insert("victim".to_string(), 0);
    for i in 0..8 {
        cache.insert(i.to_string(), i);
    }
    assert!(!cache.contains_key(&"victim".to_string()));
}

#[test]
fn test_peek_does_not_promote() {
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2); // rotation: both stale

    // peek must not refresh recency, so "a" dies two inserts later.
    assert_eq!(cache.peek(&"a"), Some(&1));
    cache.insert("c", 3);
    cache.insert("d", 4); // rotation discards the untouched stale generation
    assert!(!cache.contains_key(&"a"));
}

#[test]
fn test_contains_key_does_not_promote() {
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2);

    assert!(cache.contains_key(&"a"));
    cache.insert("c", 3);
    cache.insert("d", 4);
    assert!(!cache.contains_key(&"a"));
}

#[test]
fn test_remove_from_either_generation() {
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2); // rotation: a, b stale
    cache.insert("c", 3); // recent

    assert!(cache.remove(&"a")); // stale copy
    assert!(cache.remove(&"c")); // recent copy
    assert!(!cache.remove(&"missing"));
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"c"), None);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_remove_clears_both_copies_of_duplicated_key() {
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2); // rotation
    cache.insert("a", 10); // duplicate: fresh in recent, old in stale

    assert!(cache.remove(&"a"));
    assert_eq!(cache.get(&"a"), None);
    assert!(!cache.remove(&"a"));
}

#[test]
fn test_remove_never_fires_eviction_callback() {
    let evicted: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&evicted);

    let mut cache = DuoCache::builder(10)
        .on_eviction(move |key: &&str, _value: &i32| log.borrow_mut().push(*key))
        .build()
        .unwrap();

    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.remove(&"a");
    cache.clear();

    assert!(evicted.borrow().is_empty());
}

#[test]
fn test_clear_resets_everything() {
    let mut cache = DuoCache::new(3).unwrap();
    for i in 0..7 {
        cache.insert(i, i);
    }
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.get(&0), None);
    assert_eq!(cache.capacity(), 3);

    // The cache is fully usable after a clear.
    cache.insert(42, 42);
    assert_eq!(cache.get(&42), Some(&42));
}

#[test]
fn test_rotation_fires_callback_for_discarded_generation() {
    let evicted: Rc<RefCell<Vec<(i32, i32)>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&evicted);

    let mut cache = DuoCache::builder(2)
        .on_eviction(move |key: &i32, value: &i32| log.borrow_mut().push((*key, *value)))
        .build()
        .unwrap();

    cache.insert(1, 10);
    cache.insert(2, 20); // first rotation: stale was empty, nothing discarded
    assert!(evicted.borrow().is_empty());

    cache.insert(3, 30);
    cache.insert(4, 40); // second rotation discards {1, 2}
    assert_eq!(*evicted.borrow(), vec![(1, 10), (2, 20)]);
}

#[test]
fn test_zero_capacity_is_rejected() {
    let err = DuoCache::<u32, u32>::new(0).unwrap_err();
    assert_eq!(err, CacheError::InvalidCapacity);
}

#[test]
fn test_display_summary_string() {
    let mut cache = DuoCache::new(8).unwrap();
    assert_eq!(cache.to_string(), "DuoCache(0/8)");
    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.insert("c", 3);
    assert_eq!(cache.to_string(), "DuoCache(3/8)");
}

#[test]
fn test_duplicate_key_counts_once_and_prefers_recent() {
    let mut cache = DuoCache::new(2).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2); // rotation: a, b stale
    cache.insert("a", 10); // duplicate copy of "a"

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&"a"), Some(&10));
    let pairs: Vec<(&str, i32)> = cache.ascending().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![("b", 2), ("a", 10)]);
}

// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every eviction policy must share through the common cache
// contract, plus the ordering rule that distinguishes each one.

use citycache::builder::{CacheBuilder, CachePolicy};
use citycache::policy::fifo::FifoCache;
use citycache::policy::lfu::LfuCache;
use citycache::policy::lru::LruCache;
use citycache::policy::random::RandomCache;
use citycache::traits::{CoreCache, ReadOnlyCache};

fn all_policies() -> [CachePolicy; 4] {
    [
        CachePolicy::Lru,
        CachePolicy::Lfu,
        CachePolicy::Fifo,
        CachePolicy::Random { seed: Some(99) },
    ]
}

// ==============================================
// Capacity
// ==============================================

mod capacity {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_capacity_is_rejected_by_every_policy() {
        assert!(LruCache::<u32, u32>::try_new(0).is_err());
        assert!(LfuCache::<u32, u32>::try_new(0).is_err());
        assert!(FifoCache::<u32, u32>::try_new(0).is_err());
        assert!(RandomCache::<u32, u32>::try_new(0).is_err());
        for policy in all_policies() {
            assert!(CacheBuilder::new(0).try_build::<u32, u32>(policy).is_err());
        }
    }

    #[test]
    fn insert_at_capacity_evicts_exactly_one() {
        for policy in all_policies() {
            let mut cache = CacheBuilder::new(3).build::<u32, u32>(policy);
            for k in 0..3 {
                cache.put(k, k);
            }
            cache.put(100, 100);
            assert_eq!(cache.len(), 3, "{policy}");
            let survivors = (0..3).filter(|k| cache.contains(k)).count();
            assert_eq!(survivors, 2, "{policy}");
            assert!(cache.contains(&100), "{policy}");
        }
    }

    #[test]
    fn updating_a_resident_key_never_evicts() {
        for policy in all_policies() {
            let mut cache = CacheBuilder::new(2).build::<u32, u32>(policy);
            cache.put(1, 1);
            cache.put(2, 2);
            assert_eq!(cache.put(1, 10), Some(1), "{policy}");
            assert!(cache.contains(&2), "{policy}");
            assert_eq!(cache.peek(&1), Some(&10), "{policy}");
        }
    }

    proptest! {
        /// Property: resident count never exceeds capacity
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_len_within_capacity(
            capacity in 1usize..16,
            ops in prop::collection::vec((any::<bool>(), 0u16..64), 0..300)
        ) {
            for policy in all_policies() {
                let mut cache = CacheBuilder::new(capacity).build::<u16, u16>(policy);
                for &(is_get, key) in &ops {
                    if is_get {
                        let _ = cache.get(&key);
                    } else {
                        cache.put(key, key);
                    }
                    prop_assert!(cache.len() <= capacity);
                }
            }
        }

        /// Property: the most recently put key is always resident
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_last_put_is_resident(
            capacity in 1usize..8,
            keys in prop::collection::vec(0u16..32, 1..100)
        ) {
            for policy in all_policies() {
                let mut cache = CacheBuilder::new(capacity).build::<u16, u16>(policy);
                for &key in &keys {
                    cache.put(key, key);
                    prop_assert!(cache.contains(&key));
                }
            }
        }

        /// Property: per-policy internal invariants hold after any sequence
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_internal_invariants_hold(
            ops in prop::collection::vec((any::<bool>(), 0u8..24), 0..200)
        ) {
            let mut lru = LruCache::new(5);
            let mut lfu = LfuCache::new(5);
            let mut fifo = FifoCache::new(5);
            let mut random = RandomCache::with_seed(5, 3);
            for &(is_get, key) in &ops {
                if is_get {
                    let _ = lru.get(&key);
                    let _ = lfu.get(&key);
                    let _ = fifo.get(&key);
                    let _ = random.get(&key);
                } else {
                    lru.put(key, key);
                    lfu.put(key, key);
                    fifo.put(key, key);
                    random.put(key, key);
                }
            }
            prop_assert!(lru.check_invariants().is_ok());
            prop_assert!(lfu.check_invariants().is_ok());
            prop_assert!(fifo.check_invariants().is_ok());
            prop_assert!(random.check_invariants().is_ok());
        }
    }
}

// ==============================================
// Ordering
// ==============================================

mod ordering {
    use super::*;

    #[test]
    fn recency_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn frequency_evicts_least_frequently_used() {
        let mut cache = LfuCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"a");
        cache.put("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn insertion_order_ignores_access() {
        let mut cache = FifoCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn snapshot_ends_with_next_victim() {
        for policy in [CachePolicy::Lru, CachePolicy::Lfu, CachePolicy::Fifo] {
            let mut cache = CacheBuilder::new(3).build::<u32, u32>(policy);
            for k in 0..3 {
                cache.put(k, k);
            }
            cache.get(&0);
            cache.get(&1);
            let predicted = *cache.snapshot().last().unwrap().key;
            let (victim, _) = cache.pop_victim().unwrap();
            assert_eq!(victim, predicted, "{policy}");
        }
    }
}

// ==============================================
// Random eviction distribution
// ==============================================

mod random_distribution {
    use super::*;

    #[test]
    fn forced_evictions_are_roughly_uniform() {
        const RESIDENTS: usize = 5;
        const TRIALS: usize = 10_000;

        let mut cache = RandomCache::with_seed(RESIDENTS, 0x5eed);
        let mut counts = [0usize; RESIDENTS];
        for _ in 0..TRIALS {
            for k in 0..RESIDENTS {
                cache.put(k, ());
            }
            let (victim, ()) = cache.pop_victim().unwrap();
            counts[victim] += 1;
            cache.clear();
        }

        let expected = TRIALS / RESIDENTS;
        for (key, &count) in counts.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < expected / 6,
                "key {key} evicted {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn every_resident_is_eventually_chosen_on_insert() {
        let mut cache = RandomCache::with_seed(4, 11);
        let mut seen = [false; 4];
        for round in 0..500u32 {
            for k in 0..4u32 {
                cache.put(k, round);
            }
            cache.put(1000, round);
            for (k, slot) in seen.iter_mut().enumerate() {
                if !cache.contains(&(k as u32)) {
                    *slot = true;
                }
            }
            cache.clear();
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn same_seed_same_victims() {
        let run = |seed| {
            let mut cache = RandomCache::with_seed(8, seed);
            for k in 0..8u32 {
                cache.put(k, k);
            }
            (0..8).filter_map(|_| cache.pop_victim().map(|(k, _)| k)).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }
}

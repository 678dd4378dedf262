#![cfg(feature = "concurrency")]

use std::sync::Arc;
use std::thread;

use citycache::builder::{CacheBuilder, CachePolicy};
use citycache::concurrent::SharedCache;
use citycache::key::{CityKey, normalize};

#[test]
fn concurrent_mixed_workload_respects_capacity() {
    for policy in CachePolicy::ALL {
        let cache = Arc::new(SharedCache::new(
            CacheBuilder::new(16).build::<CityKey, String>(policy),
        ));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..200 {
                        let key = normalize(&format!("city{}", i % 40), &format!("c{t}"));
                        if cache.get(&key).is_none() {
                            cache.put(key, i.to_string());
                        }
                        assert!(cache.len() <= 16);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(cache.len(), 16, "{policy}");
        assert_eq!(cache.snapshot_owned().len(), 16, "{policy}");
    }
}

#[test]
fn values_are_cloned_out() {
    let cache = SharedCache::new(CacheBuilder::new(2).build::<CityKey, String>(CachePolicy::Lru));
    cache.put(normalize("Lima", "PE"), "9750000".to_string());
    let value = cache.get(&normalize("lima", "pe"));
    cache.clear();
    assert_eq!(value.as_deref(), Some("9750000"));
    assert!(cache.is_empty());
}

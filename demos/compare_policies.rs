//! Example: the same query stream under each eviction policy.
//!
//! Run with: cargo run --example compare_policies

use citycache::builder::{CacheBuilder, CachePolicy};
use citycache::key::{CityKey, normalize};
use citycache::traits::{CoreCache, ReadOnlyCache};

fn main() {
    println!("=== Policy Comparison (capacity 3) ===\n");

    let stream = [
        ("tokyo", "jp"),
        ("delhi", "in"),
        ("tokyo", "jp"),
        ("paris", "fr"),
        ("tokyo", "jp"),
        ("lima", "pe"),
        ("delhi", "in"),
        ("cairo", "eg"),
    ];

    let policies = [
        CachePolicy::Lru,
        CachePolicy::Lfu,
        CachePolicy::Fifo,
        CachePolicy::Random { seed: Some(7) },
    ];

    for policy in policies {
        let mut cache = CacheBuilder::new(3).build::<CityKey, String>(policy);
        let mut hits = 0;
        for (city, country) in stream {
            let key = normalize(city, country);
            if cache.get(&key).is_some() {
                hits += 1;
            } else {
                cache.put(key, format!("pop({city})"));
            }
        }

        let resident: Vec<String> = cache.snapshot().iter().map(|e| e.key.to_string()).collect();
        println!("{policy:<7} hits {hits}/{}  resident: {}", stream.len(), resident.join(" | "));
        debug_assert!(cache.len() <= cache.capacity());
    }
}

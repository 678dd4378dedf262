//! Example: answering queries through a trie index and an LRU cache.
//!
//! Run with: cargo run --example basic_lookup

use std::io::Cursor;

use citycache::dataset::load_reader;
use citycache::index::{CityIndex, CityTrie};
use citycache::lookup::CityLookup;
use citycache::policy::lru::LruCache;

const DATASET: &str = "\
countryCode,cityName,population
jp,Tokyo,37400000
in,Delhi,31000000
cn,Shanghai,27100000
br,Sao Paulo,22000000
fr,Paris,2148000
us,Paris,25000
";

fn main() {
    println!("=== Basic Lookup ===\n");

    let mut trie = CityTrie::new();
    let report = load_reader(Cursor::new(DATASET), &mut trie).expect("in-memory dataset");
    println!("loaded {} rows ({} trie nodes)\n", report.loaded, trie.node_count());

    let mut service = CityLookup::new(LruCache::new(2), trie);

    for (city, country) in [
        ("Tokyo", "JP"),
        ("tokyo", "jp"), // served from cache
        ("Paris", "US"),
        ("Delhi", "IN"), // evicts tokyo
        ("Tokyo", "JP"),
        ("Atlantis", "GR"),
    ] {
        let result = service.lookup(city, country);
        match &result.population {
            Some(pop) => println!("{:<6} {city}, {country} => {pop}", result.source),
            None => println!("{:<6} {city}, {country} not found", result.source),
        }
    }

    println!("\ncache, most recent first:");
    for entry in service.snapshot() {
        println!("   {} => {}", entry.key, entry.value);
    }

    println!("\nprefix 'pa': {:?}", service.index().suggest("pa", 5));

    let stats = service.stats();
    println!(
        "\ncache hits {}, index hits {}, misses {} (hit ratio {:.2})",
        stats.cache_hits,
        stats.index_hits,
        stats.misses,
        stats.hit_ratio()
    );
}

//! Interactive city population lookup.
//!
//! Loads the dataset into an index once, then answers `(city, country)`
//! queries from stdin through a bounded cache, printing the cache contents
//! after every query.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use citycache::builder::{Cache, CachePolicy};
use citycache::dataset::load_path;
use citycache::index::{CityIndex, CityTrie, LinearScan};
use citycache::key::CityKey;
use citycache::lookup::{CityLookup, HitSource, MissHint};

// =============================================================================
// CLI Arguments
// =============================================================================

/// City population lookup with a bounded in-memory cache
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV dataset (countryCode,cityName,population with a header line)
    #[arg(long, env = "CITYPOP_DATASET", default_value = "world_cities.csv")]
    dataset: PathBuf,

    /// Maximum number of cached entries
    #[arg(long, env = "CITYPOP_CAPACITY", default_value = "10")]
    capacity: usize,

    /// Eviction policy: lru, lfu, fifo or random
    #[arg(long, env = "CITYPOP_POLICY", default_value = "lru")]
    policy: CachePolicy,

    /// Seed for the random policy
    #[arg(long, env = "CITYPOP_SEED")]
    seed: Option<u64>,

    /// Scan the dataset rows instead of building the trie
    #[arg(long)]
    scan: bool,

    /// Do not print the cache after each query
    #[arg(long)]
    quiet_cache: bool,
}

impl Args {
    fn resolved_policy(&self) -> CachePolicy {
        match self.policy {
            CachePolicy::Random { seed } => CachePolicy::Random {
                seed: self.seed.or(seed),
            },
            other => other,
        }
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    if args.scan {
        run(&args, LinearScan::new())
    } else {
        run(&args, CityTrie::new())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run<I: CityIndex>(args: &Args, mut index: I) -> Result<()> {
    let report = load_path(&args.dataset, &mut index)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;
    info!(
        records = index.len(),
        skipped = report.skipped,
        policy = %args.resolved_policy(),
        capacity = args.capacity,
        "ready"
    );

    let mut service = CityLookup::with_policy(index, args.capacity, args.resolved_policy())
        .context("invalid cache configuration")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    writeln!(out, "City Population Lookup")?;
    loop {
        write!(out, "\nEnter city name (or 'exit' to quit): ")?;
        out.flush()?;
        let Some(city) = read_line(&mut input)? else {
            break;
        };
        if city == "exit" {
            break;
        }

        write!(out, "Enter country code: ")?;
        out.flush()?;
        let Some(country) = read_line(&mut input)? else {
            break;
        };

        let result = service.lookup(&city, &country);
        match (result.source, result.population.as_deref()) {
            (HitSource::Cache, Some(pop)) => {
                writeln!(out, "Cache Hit: Population of {city}, {country} is {pop}")?;
            },
            (HitSource::Index, Some(pop)) => {
                writeln!(out, "Index Hit: Population of {city}, {country} is {pop}")?;
            },
            _ => {
                writeln!(out, "City not found in dataset.")?;
                match service.miss_hint(&city, 5) {
                    MissHint::Countries(codes) => {
                        writeln!(out, "{city} is listed under: {}", codes.join(", "))?;
                    },
                    MissHint::Names(names) => {
                        writeln!(out, "Did you mean: {}", names.join(", "))?;
                    },
                    MissHint::Nothing => {},
                }
            },
        }

        if !args.quiet_cache {
            print_cache(&mut out, &service)?;
        }
    }

    let stats = service.stats();
    info!(
        cache_hits = stats.cache_hits,
        index_hits = stats.index_hits,
        misses = stats.misses,
        hit_ratio = stats.hit_ratio(),
        "session finished"
    );
    Ok(())
}

/// Reads one trimmed line; `None` on end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn print_cache<I: CityIndex>(
    out: &mut impl Write,
    service: &CityLookup<Cache<CityKey, String>, I>,
) -> io::Result<()> {
    let order = match service.cache().policy() {
        CachePolicy::Lru => "Most Recent First",
        CachePolicy::Lfu => "Most Frequent First",
        CachePolicy::Fifo => "Newest First",
        CachePolicy::Random { .. } => "Unordered",
    };
    writeln!(out, "\n[Cache - {order}]")?;
    for entry in service.snapshot() {
        writeln!(
            out,
            "{}, {} => {}",
            entry.key.city_name(),
            entry.key.country_code(),
            entry.value
        )?;
    }
    Ok(())
}

//! End-to-end tests replaying traces through the simulator.

use cachesim::cache::{Cache, Outcome};
use cachesim::common::AccessEvent;
use cachesim::config::CacheGeometry;
use cachesim::sim::{loader, Simulator};

fn trace_path(name: &str) -> String {
    format!("{}/traces/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Replays a bundled trace and returns `(hits, misses, evictions)`.
fn replay(name: &str, s: u32, e: usize, b: u32) -> (u64, u64, u64) {
    let mut sim = Simulator::new(&CacheGeometry::new(s, e, b)).unwrap();
    for event in loader::open_trace(trace_path(name)).unwrap() {
        sim.process(&event.unwrap());
    }
    let stats = sim.stats();
    (stats.hits, stats.misses, stats.evictions)
}

/// Replays a trace and renders the verbose per-event lines.
fn verbose_lines(name: &str, s: u32, e: usize, b: u32) -> Vec<String> {
    let mut sim = Simulator::new(&CacheGeometry::new(s, e, b)).unwrap();
    loader::load_trace(trace_path(name))
        .unwrap()
        .iter()
        .filter_map(|ev| sim.process(ev).map(|r| format!("{} {}", ev, r)))
        .collect()
}

/// Small xorshift generator so address streams are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Tests the yi trace on a 16-set direct-mapped cache.
#[test]
fn test_yi_trace_direct_mapped() {
    assert_eq!(replay("yi.trace", 4, 1, 4), (4, 5, 3));
}

/// Tests the yi trace on a 2-set direct-mapped cache with 2-byte blocks.
#[test]
fn test_yi_trace_small_blocks() {
    assert_eq!(replay("yi.trace", 1, 1, 1), (2, 7, 5));
}

/// Tests the dave trace on two geometries.
#[test]
fn test_dave_trace() {
    assert_eq!(replay("dave.trace", 4, 1, 4), (2, 3, 0));
    assert_eq!(replay("dave.trace", 1, 2, 3), (0, 5, 1));
}

/// Tests that instruction, unknown, and malformed lines never reach the cache.
#[test]
fn test_mixed_trace() {
    assert_eq!(replay("mixed.trace", 4, 1, 4), (2, 2, 0));
    assert_eq!(replay("mixed.trace", 0, 1, 0), (1, 3, 2));

    let mut sim = Simulator::new(&CacheGeometry::new(4, 1, 4)).unwrap();
    let events = loader::load_trace(trace_path("mixed.trace")).unwrap();
    sim.run(&events);
    assert_eq!(sim.stats().events, 3);
    assert_eq!(sim.stats().ignored, 3);
}

/// Tests verbose output for the yi trace.
#[test]
fn test_yi_trace_verbose_output() {
    assert_eq!(
        verbose_lines("yi.trace", 4, 1, 4),
        vec![
            "L 10,1 miss",
            "M 20,1 miss hit",
            "L 22,1 hit",
            "S 18,1 hit",
            "L 110,1 miss eviction",
            "L 210,1 miss eviction",
            "M 12,1 miss eviction hit",
        ]
    );
}

/// Tests that every access resolves to exactly one outcome across geometries.
#[test]
fn test_accounting_invariant_random_streams() {
    let geometries = [(0, 1, 0), (0, 4, 2), (2, 1, 3), (3, 2, 4), (4, 8, 2), (1, 3, 6)];

    for (seed, &(s, e, b)) in geometries.iter().enumerate() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15 ^ seed as u64);
        let mut sim = Simulator::new(&CacheGeometry::new(s, e, b)).unwrap();
        let mut calls = 0u64;

        for _ in 0..2000 {
            let r = rng.next();
            // Keep addresses in a small window so hits actually occur.
            let addr = r % 0x800;
            let event = match r >> 62 {
                0 | 1 => AccessEvent::load(addr, 4),
                2 => AccessEvent::store(addr, 4),
                _ => AccessEvent::modify(addr, 4),
            };
            calls += event.kind.cache_accesses() as u64;
            sim.process(&event);
        }

        let stats = sim.stats();
        assert_eq!(stats.hits + stats.misses, calls);
        assert_eq!(sim.cache().clock(), calls);
        assert!(stats.evictions <= stats.misses);
    }
}

/// Tests the associativity bound and tag uniqueness after every access.
#[test]
fn test_set_occupancy_invariants() {
    let geometry = CacheGeometry::new(2, 3, 1);
    let mut cache = Cache::try_new(&geometry).unwrap();
    let mut rng = XorShift(42);

    for _ in 0..1000 {
        cache.access(rng.next() % 0x100);

        for set in cache.sets() {
            assert!(set.valid_count() <= geometry.lines_per_set);
            let mut tags: Vec<u64> = set.lines().iter().filter(|l| l.valid).map(|l| l.tag).collect();
            let n = tags.len();
            tags.sort_unstable();
            tags.dedup();
            assert_eq!(tags.len(), n, "duplicate tag in set");
        }
    }
}

/// Tests that a modify never produces two misses when E >= 1.
#[test]
fn test_modify_always_pairs_with_hit() {
    for (s, e, b) in [(0, 1, 0), (1, 2, 2), (3, 4, 4)] {
        let mut sim = Simulator::new(&CacheGeometry::new(s, e, b)).unwrap();
        let mut rng = XorShift(7 + e as u64);

        for _ in 0..500 {
            let result = sim
                .process(&AccessEvent::modify(rng.next() % 0x400, 8))
                .unwrap();
            assert_eq!(result.second, Some(Outcome::Hit));
        }
    }
}

/// Tests that LRU matches a reference recency-list model on a fully
/// associative cache.
#[test]
fn test_lru_matches_reference_model() {
    let ways = 4;
    let mut cache = Cache::try_new(&CacheGeometry::new(0, ways, 0)).unwrap();
    // Most recently used at the back.
    let mut order: Vec<u64> = Vec::new();
    let mut rng = XorShift(0xDEAD_BEEF);

    for _ in 0..3000 {
        let addr = rng.next() % 7;
        let expected = if let Some(pos) = order.iter().position(|&a| a == addr) {
            order.remove(pos);
            Outcome::Hit
        } else if order.len() < ways {
            Outcome::Miss
        } else {
            order.remove(0);
            Outcome::MissWithEviction
        };
        order.push(addr);

        assert_eq!(cache.access(addr), expected);
        for a in &order {
            assert!(cache.contains(*a));
        }
    }
}

//! Integration tests for the access simulator.

use cachesim::cache::Outcome;
use cachesim::common::{AccessEvent, AccessKind};
use cachesim::config::CacheGeometry;
use cachesim::sim::{EventOutcome, Simulator};

fn simulator(s: u32, e: usize, b: u32) -> Simulator {
    Simulator::new(&CacheGeometry::new(s, e, b)).expect("valid geometry")
}

/// Tests that construction fails fast on invalid geometry.
#[test]
fn test_simulator_rejects_invalid_geometry() {
    assert!(Simulator::new(&CacheGeometry::new(0, 0, 0)).is_err());
    assert!(Simulator::new(&CacheGeometry::new(33, 1, 31)).is_err());
}

/// Tests the direct-mapped ping-pong scenario.
#[test]
fn test_direct_mapped_thrash() {
    let mut sim = simulator(0, 1, 0);

    let outcomes: Vec<Outcome> = [0x10u64, 0x20, 0x10]
        .iter()
        .map(|a| sim.process(&AccessEvent::load(*a, 1)).unwrap().first)
        .collect();

    assert_eq!(
        outcomes,
        vec![Outcome::Miss, Outcome::MissWithEviction, Outcome::MissWithEviction]
    );
    let stats = sim.stats();
    assert_eq!(stats.hits, 0);
    // Each eviction is also counted as a miss.
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 2);
}

/// Tests that two tags fit in a two-way set without eviction.
#[test]
fn test_two_way_no_eviction() {
    let mut sim = simulator(0, 2, 0);

    sim.run(&[
        AccessEvent::load(0x0, 1),
        AccessEvent::load(0x1, 1),
        AccessEvent::load(0x0, 1),
    ]);

    let stats = sim.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.evictions, 0);
}

/// Tests that a modify is a miss followed by a hit.
#[test]
fn test_modify_is_load_then_store() {
    let mut sim = simulator(4, 1, 4);

    let result = sim.process(&AccessEvent::modify(0x20, 1)).unwrap();
    assert_eq!(
        result,
        EventOutcome {
            first: Outcome::Miss,
            second: Some(Outcome::Hit),
        }
    );
    assert_eq!(result.to_string(), "miss hit");
    assert_eq!(result.outcomes().count(), 2);

    // A resident block turns the whole modify into two hits.
    let again = sim.process(&AccessEvent::modify(0x24, 1)).unwrap();
    assert_eq!(again.to_string(), "hit hit");

    assert_eq!(sim.stats().hits, 3);
    assert_eq!(sim.stats().misses, 1);
    assert_eq!(sim.cache().clock(), 4);
}

/// Tests that a modify which evicts still pairs with a single hit.
#[test]
fn test_modify_with_eviction() {
    let mut sim = simulator(0, 1, 0);

    sim.process(&AccessEvent::load(0x1, 1));
    let result = sim.process(&AccessEvent::modify(0x2, 1)).unwrap();

    assert_eq!(result.first, Outcome::MissWithEviction);
    assert_eq!(result.second, Some(Outcome::Hit));
    assert_eq!(result.to_string(), "miss eviction hit");
    assert_eq!(sim.stats().evictions, 1);
}

/// Tests that instruction fetches and unknown operations change no counters.
#[test]
fn test_ignored_event_kinds() {
    let mut sim = simulator(2, 2, 2);

    assert!(sim
        .process(&AccessEvent::new(AccessKind::Instruction, 0x400, 4))
        .is_none());
    assert!(sim
        .process(&AccessEvent::new(AccessKind::Unknown('X'), 0x400, 4))
        .is_none());

    let stats = sim.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.events, 0);
    assert_eq!(stats.ignored, 2);
    assert_eq!(sim.cache().clock(), 0);
}

/// Tests that the access size plays no part in the outcome.
#[test]
fn test_access_size_is_ignored() {
    let mut a = simulator(1, 1, 2);
    let mut b = simulator(1, 1, 2);

    for addr in [0x0u64, 0x4, 0x8, 0x0] {
        a.process(&AccessEvent::load(addr, 1));
        b.process(&AccessEvent::load(addr, 64));
    }
    assert_eq!(a.stats(), b.stats());
}

/// Tests that independent simulators do not share state.
#[test]
fn test_simulators_are_independent() {
    let mut first = simulator(0, 1, 0);
    let mut second = simulator(0, 1, 0);

    first.process(&AccessEvent::load(0x1, 1));
    first.process(&AccessEvent::load(0x1, 1));
    second.process(&AccessEvent::load(0x1, 1));

    assert_eq!(first.stats().hits, 1);
    assert_eq!(second.stats().hits, 0);
    assert_eq!(second.cache().clock(), 1);
}

/// Tests consuming the simulator for its final statistics.
#[test]
fn test_into_stats() {
    let mut sim = simulator(0, 1, 0);
    sim.process(&AccessEvent::store(0x8, 4));

    let stats = sim.into_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.events, 1);
}

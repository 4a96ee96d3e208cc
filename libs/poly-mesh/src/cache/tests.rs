//! Tests covering memoization and statistics.

use super::*;
use std::sync::atomic::AtomicUsize;
use std::sync::Barrier;

#[test]
fn memo_computes_once() {
    let calls = AtomicUsize::new(0);
    let memo = Memo::new();
    for _ in 0..3 {
        let value = memo.get_or_compute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![1, 2, 3]
        });
        assert_eq!(value, &vec![1, 2, 3]);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(memo.is_filled());
}

#[test]
fn memo_returns_same_allocation() {
    let memo: Memo<Vec<u32>> = Memo::new();
    let first = memo.get_or_compute(|| vec![7; 16]).as_ptr();
    let second = memo.get_or_compute(Vec::new).as_ptr();
    assert_eq!(first, second);
}

/// Races many first callers and checks the computation ran exactly once.
#[test]
fn memo_concurrent_first_access_runs_once() {
    const THREADS: usize = 16;
    let calls = AtomicUsize::new(0);
    let memo: Memo<u64> = Memo::new();
    let barrier = Barrier::new(THREADS);

    std::thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                let value = memo.get_or_compute(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(std::time::Duration::from_millis(5));
                    99
                });
                assert_eq!(*value, 99);
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fetch_records_hits_and_misses() {
    let cache = DerivedCache::new();
    assert!(!cache.is_filled(CacheKind::Indices));

    let first = cache.fetch(CacheKind::Indices, &cache.indices, || vec![0, 1, 2]);
    assert_eq!(first, &vec![0, 1, 2]);
    let again = cache.fetch(CacheKind::Indices, &cache.indices, || vec![9]);
    assert_eq!(again, &vec![0, 1, 2]);

    assert!(cache.is_filled(CacheKind::Indices));
    assert_eq!(cache.stats().misses(CacheKind::Indices), 1);
    assert_eq!(cache.stats().hits(CacheKind::Indices), 1);
    assert_eq!(cache.stats().misses(CacheKind::Edges), 0);
    assert!((cache.stats().hit_rate() - 0.5).abs() < 1e-12);
}

#[test]
fn clone_starts_empty() {
    let cache = DerivedCache::new();
    cache.fetch(CacheKind::UsedVertices, &cache.used_vertices, || vec![4]);
    let cloned = cache.clone();
    assert!(!cloned.is_filled(CacheKind::UsedVertices));
    assert_eq!(cloned.stats().misses(CacheKind::UsedVertices), 0);
}

#[test]
fn empty_stats_hit_rate_is_zero() {
    assert_eq!(CacheStats::default().hit_rate(), 0.0);
}

//! # Derived Cache
//!
//! Per-geometry memoization of derived computations.
//!
//! ## Features
//!
//! - **Single assignment**: each slot is a `once_cell::sync::OnceCell`, so the
//!   first caller computes and publishes, every later caller reads
//! - **Thread safe**: concurrent first callers block on the one running
//!   computation instead of racing it
//! - **Statistics**: hit/miss counters per computation kind
//!
//! There is no eviction. Entries live exactly as long as the owning geometry.
//!
//! ## Example
//!
//! ```rust
//! use poly_mesh::cache::Memo;
//!
//! let memo = Memo::new();
//! assert_eq!(*memo.get_or_compute(|| 6 * 7), 42);
//! assert_eq!(*memo.get_or_compute(|| unreachable!()), 42);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;

use crate::core::vec3::Vec3;

// =============================================================================
// MEMO
// =============================================================================

/// A lazily initialized, single-assignment value.
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the published value, if any.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Returns the published value, running `compute` first if the slot is
    /// still empty.
    ///
    /// `compute` runs at most once per slot, even when several threads arrive
    /// before the value is published.
    #[inline]
    pub fn get_or_compute<F>(&self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(compute)
    }

    /// Returns true once a value has been published.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<empty>)"),
        }
    }
}

// =============================================================================
// CACHE KINDS
// =============================================================================

/// Identity of a derived computation stored in a [`DerivedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Flattened element indices.
    Indices,
    /// Flattened cyclic edge vertex pairs.
    Edges,
    /// Per-element midpoints.
    FaceMidpoints,
    /// Per-element normals.
    FaceNormals,
    /// Sorted distinct referenced vertex indices.
    UsedVertices,
}

impl CacheKind {
    /// Every kind, in slot order.
    pub const ALL: [CacheKind; 5] = [
        CacheKind::Indices,
        CacheKind::Edges,
        CacheKind::FaceMidpoints,
        CacheKind::FaceNormals,
        CacheKind::UsedVertices,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Hit/miss counters for monitoring.
///
/// A miss is counted each time a computation actually runs, so for any kind
/// `misses` never exceeds one.
#[derive(Default)]
pub struct CacheStats {
    hits: [AtomicU64; CacheKind::ALL.len()],
    misses: [AtomicU64; CacheKind::ALL.len()],
}

impl CacheStats {
    /// Number of lookups served from a published value.
    pub fn hits(&self, kind: CacheKind) -> u64 {
        self.hits[kind.slot()].load(Ordering::Relaxed)
    }

    /// Number of computations executed.
    pub fn misses(&self, kind: CacheKind) -> u64 {
        self.misses[kind.slot()].load(Ordering::Relaxed)
    }

    /// Computes the hit rate (0.0 to 1.0) over every kind.
    ///
    /// # Returns
    ///
    /// Hit rate as a fraction, or 0.0 if no accesses.
    pub fn hit_rate(&self) -> f64 {
        let (hits, misses) = CacheKind::ALL.iter().fold((0u64, 0u64), |(h, m), kind| {
            (h + self.hits(*kind), m + self.misses(*kind))
        });
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    fn record_hit(&self, kind: CacheKind) {
        self.hits[kind.slot()].fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self, kind: CacheKind) {
        self.misses[kind.slot()].fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in CacheKind::ALL {
            map.entry(&kind, &(self.hits(kind), self.misses(kind)));
        }
        map.finish()
    }
}

// =============================================================================
// DERIVED CACHE
// =============================================================================

/// Memoized derived data of one geometry.
///
/// Cloning yields an empty cache: a clone recomputes lazily on its own.
#[derive(Debug, Default)]
pub struct DerivedCache {
    pub(crate) indices: Memo<Vec<u32>>,
    pub(crate) edges: Memo<Vec<[u32; 2]>>,
    pub(crate) face_midpoints: Memo<Vec<Vec3>>,
    pub(crate) face_normals: Memo<Vec<Vec3>>,
    pub(crate) used_vertices: Memo<Vec<u32>>,
    stats: CacheStats,
}

impl DerivedCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit/miss counters of this cache.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Returns true once the computation of `kind` has been published.
    pub fn is_filled(&self, kind: CacheKind) -> bool {
        match kind {
            CacheKind::Indices => self.indices.is_filled(),
            CacheKind::Edges => self.edges.is_filled(),
            CacheKind::FaceMidpoints => self.face_midpoints.is_filled(),
            CacheKind::FaceNormals => self.face_normals.is_filled(),
            CacheKind::UsedVertices => self.used_vertices.is_filled(),
        }
    }

    /// Fetches `memo`, computing it on first access and recording the outcome
    /// under `kind`.
    pub(crate) fn fetch<'a, T, F>(&'a self, kind: CacheKind, memo: &'a Memo<T>, compute: F) -> &'a T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = memo.get() {
            self.stats.record_hit(kind);
            return value;
        }

        let mut computed = false;
        let value = memo.get_or_compute(|| {
            computed = true;
            self.stats.record_miss(kind);
            log::debug!("computing derived {kind:?}");
            compute()
        });
        if !computed {
            self.stats.record_hit(kind);
        }
        value
    }
}

impl Clone for DerivedCache {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;

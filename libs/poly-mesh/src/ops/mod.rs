//! Derived geometric operations built on elements and geometries.

pub mod coplanar;
pub mod merge;

pub use coplanar::{can_merge_tris, coplanar};
pub use merge::{merge_coplanar, to_poly_mesh};

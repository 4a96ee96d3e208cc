//! Thin wrapper around `glam::DVec3` shared across geometry modules.
//!
//! The helper functions keep positional math readable while avoiding direct
//! dependencies on `glam` from higher layers.

pub use glam::DVec2 as Vec2;
pub use glam::DVec3 as Vec3;

/// Arithmetic mean of a set of positions.
///
/// Returns `None` for an empty input.
///
/// # Examples
/// ```
/// use poly_mesh::core::vec3::{centroid, Vec3};
/// let c = centroid([Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]).unwrap();
/// assert_eq!(c, Vec3::new(1.0, 0.0, 0.0));
/// ```
pub fn centroid<I>(points: I) -> Option<Vec3>
where
    I: IntoIterator<Item = Vec3>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, count), p| (sum + p, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Component-wise bounds of a set of positions.
///
/// Returns `None` for an empty input.
///
/// # Examples
/// ```
/// use poly_mesh::core::vec3::{bounds, Vec3};
/// let (min, max) = bounds([Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -2.0, 3.0)]).unwrap();
/// assert_eq!(min, Vec3::new(-1.0, -2.0, 0.0));
/// assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
/// ```
pub fn bounds<I>(points: I) -> Option<(Vec3, Vec3)>
where
    I: IntoIterator<Item = Vec3>,
{
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((min, max)) => Some((min.min(p), max.max(p))),
    })
}

//! Geometry-level configuration building on the shared `config` crate.
//!
//! The coplanarity predicate compares a scalar triple product, a volume. A
//! fixed absolute epsilon is therefore only meaningful for one coordinate
//! scale; [`GeometryConfig::tolerance_for`] scales the workspace's relative
//! tolerance to the extent of a concrete geometry instead.

use config::constants::{GlobalConfig, MIN_COPLANAR_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Geometry;

/// Absolute tolerance for the coplanarity predicate, in cubic length units.
///
/// # Examples
/// ```
/// use poly_mesh::config::Tolerance;
/// let tol = Tolerance::new(1.0e-6).unwrap();
/// assert_eq!(tol.value(), 1.0e-6);
/// assert!(Tolerance::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Wraps an absolute tolerance.
    ///
    /// # Errors
    /// [`GeometryError::InvalidTolerance`] unless the value is positive and
    /// finite.
    pub fn new(value: f64) -> GeometryResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GeometryError::InvalidTolerance(value))
        }
    }

    /// `relative · length³`, floored at the workspace minimum.
    pub fn scaled(relative: f64, length: f64) -> GeometryResult<Self> {
        let scaled = relative * length.abs().powi(3);
        Self::new(scaled.max(MIN_COPLANAR_TOLERANCE))
    }

    /// The absolute value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Geometry configuration wrapper.
///
/// # Examples
/// ```
/// use poly_mesh::config::GeometryConfig;
/// let cfg = GeometryConfig::default();
/// assert!(cfg.coplanar_relative_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Relative coplanarity tolerance, scaled by the cube of a geometry's
    /// bounding-box diagonal.
    pub coplanar_relative_tolerance: f64,
    /// Upper bound on tessellation steps per parameter axis.
    pub max_tessellation_steps: u32,
}

impl GeometryConfig {
    /// Creates a configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use poly_mesh::config::GeometryConfig;
    /// let cfg = GeometryConfig::new(1.0e-4, 128).unwrap();
    /// assert_eq!(cfg.max_tessellation_steps, 128);
    /// ```
    pub fn new(coplanar_relative_tolerance: f64, max_tessellation_steps: u32) -> GeometryResult<Self> {
        let global = GlobalConfig::new(coplanar_relative_tolerance, max_tessellation_steps)?;
        Ok(Self::from(global))
    }

    /// Coplanarity tolerance calibrated to the extent of `geometry`.
    ///
    /// Uses the bounding-box diagonal of the referenced vertices; geometries
    /// without referenced vertices get the workspace minimum.
    ///
    /// # Examples
    /// ```
    /// use poly_mesh::{config::GeometryConfig, Geometry, Vec3};
    /// let big = Geometry::points(vec![Vec3::ZERO, Vec3::splat(1000.0)], vec![0, 1]).unwrap();
    /// let small = Geometry::points(vec![Vec3::ZERO, Vec3::splat(1.0)], vec![0, 1]).unwrap();
    /// let cfg = GeometryConfig::default();
    /// assert!(cfg.tolerance_for(&big).unwrap() > cfg.tolerance_for(&small).unwrap());
    /// ```
    pub fn tolerance_for(&self, geometry: &Geometry) -> GeometryResult<Tolerance> {
        let diagonal = geometry
            .bounding_box()
            .map_or(0.0, |(min, max)| (max - min).length());
        Tolerance::scaled(self.coplanar_relative_tolerance, diagonal)
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::from(GlobalConfig::default())
    }
}

impl From<GlobalConfig> for GeometryConfig {
    fn from(global: GlobalConfig) -> Self {
        Self {
            coplanar_relative_tolerance: global.coplanar_relative_tolerance,
            max_tessellation_steps: global.max_tessellation_steps,
        }
    }
}

#[cfg(test)]
mod tests;

//! # Procedural Geometry
//!
//! Stateless maps from parameter space into 3D:
//!
//! - [`Field`]: point → vector
//! - [`Surface`]: `(u, v)` → position
//! - [`Curve`]: `t` → position
//!
//! Implementations are pure. Behaviour outside the declared domain is up to
//! each implementation. Closures of the matching shape implement the traits
//! directly.
//!
//! ## Example
//!
//! ```rust
//! use poly_mesh::procedural::{tessellate, PlaneSurface};
//! use poly_mesh::Vec3;
//!
//! let plane = PlaneSurface::new(Vec3::ZERO, Vec3::X, Vec3::Y);
//! let mesh = tessellate(&plane, 4, 2)?;
//! assert_eq!(mesh.face_count(), 2 * 4 * 2);
//! # Ok::<(), poly_mesh::GeometryError>(())
//! ```

use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::builder::MeshBuilder;
use crate::config::GeometryConfig;
use crate::core::vec3::{Vec2, Vec3};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Geometry;

// =============================================================================
// CONTRACTS
// =============================================================================

/// A vector field over 3D space.
pub trait Field: Send + Sync {
    /// Vector at `point`.
    fn vector_at(&self, point: Vec3) -> Vec3;
}

/// A parametric surface over `(u, v)`, nominally `[0, 1]²`.
pub trait Surface: Send + Sync {
    /// Position at `uv`.
    fn position_at(&self, uv: Vec2) -> Vec3;
}

/// A parametric curve over `t`, nominally `[0, 1]`.
pub trait Curve: Send + Sync {
    /// Position at `t`.
    fn position_at(&self, t: f64) -> Vec3;
}

impl<F> Field for F
where
    F: Fn(Vec3) -> Vec3 + Send + Sync,
{
    fn vector_at(&self, point: Vec3) -> Vec3 {
        self(point)
    }
}

impl<F> Surface for F
where
    F: Fn(Vec2) -> Vec3 + Send + Sync,
{
    fn position_at(&self, uv: Vec2) -> Vec3 {
        self(uv)
    }
}

impl<F> Curve for F
where
    F: Fn(f64) -> Vec3 + Send + Sync,
{
    fn position_at(&self, t: f64) -> Vec3 {
        self(t)
    }
}

// =============================================================================
// IMPLEMENTATIONS
// =============================================================================

/// The same vector everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField(pub Vec3);

impl Field for UniformField {
    fn vector_at(&self, _point: Vec3) -> Vec3 {
        self.0
    }
}

/// Parallelogram `origin + u·u_axis + v·v_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    origin: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
}

impl PlaneSurface {
    /// Creates a plane patch spanned by two axes.
    pub fn new(origin: Vec3, u_axis: Vec3, v_axis: Vec3) -> Self {
        Self {
            origin,
            u_axis,
            v_axis,
        }
    }
}

impl Surface for PlaneSurface {
    fn position_at(&self, uv: Vec2) -> Vec3 {
        self.origin + self.u_axis * uv.x + self.v_axis * uv.y
    }
}

/// Sphere parameterized by longitude `u` and colatitude `v`, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSurface {
    center: Vec3,
    radius: f64,
}

impl SphereSurface {
    /// Creates a sphere surface.
    ///
    /// # Errors
    /// [`GeometryError::InvalidSampling`] for a non-positive radius.
    pub fn new(center: Vec3, radius: f64) -> GeometryResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidSampling(format!(
                "sphere radius must be positive: {radius}"
            )));
        }
        Ok(Self { center, radius })
    }
}

impl Surface for SphereSurface {
    fn position_at(&self, uv: Vec2) -> Vec3 {
        let theta = uv.x * TAU;
        let phi = uv.y * std::f64::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        self.center + Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi) * self.radius
    }
}

/// Straight segment from `start` (t = 0) to `end` (t = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCurve {
    start: Vec3,
    end: Vec3,
}

impl LineCurve {
    /// Creates a segment.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

impl Curve for LineCurve {
    fn position_at(&self, t: f64) -> Vec3 {
        self.start.lerp(self.end, t)
    }
}

/// Helix around the z axis: `turns` revolutions while rising `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixCurve {
    radius: f64,
    height: f64,
    turns: f64,
}

impl HelixCurve {
    /// Creates a helix.
    pub fn new(radius: f64, height: f64, turns: f64) -> Self {
        Self {
            radius,
            height,
            turns,
        }
    }
}

impl Curve for HelixCurve {
    fn position_at(&self, t: f64) -> Vec3 {
        let (sin, cos) = (t * self.turns * TAU).sin_cos();
        Vec3::new(self.radius * cos, self.radius * sin, self.height * t)
    }
}

// =============================================================================
// SAMPLING
// =============================================================================

/// `samples` positions at evenly spaced `t` from 0 to 1 inclusive.
///
/// # Errors
/// [`GeometryError::InvalidSampling`] for fewer than two samples.
pub fn sample_curve<C: Curve + ?Sized>(curve: &C, samples: usize) -> GeometryResult<Vec<Vec3>> {
    if samples < 2 {
        return Err(GeometryError::InvalidSampling(format!(
            "a curve needs at least 2 samples, got {samples}"
        )));
    }
    let last = (samples - 1) as f64;
    Ok((0..samples)
        .map(|i| curve.position_at(i as f64 / last))
        .collect())
}

/// Field vectors at every vertex of `geometry`, in vertex order.
pub fn sample_field<F: Field + ?Sized>(field: &F, geometry: &Geometry) -> Vec<Vec3> {
    geometry
        .vertices()
        .par_iter()
        .map(|&p| field.vector_at(p))
        .collect()
}

/// Triangulates `surface` over a `u_steps × v_steps` grid of `[0, 1]²`.
///
/// Produces `(u_steps + 1)(v_steps + 1)` vertices and two triangles per grid
/// cell. Seams are not welded.
///
/// # Errors
/// [`GeometryError::InvalidSampling`] when a step count is 0 or above the
/// configured limit, or when the grid has more vertices than `u32` indices
/// can address.
pub fn tessellate<S: Surface + ?Sized>(
    surface: &S,
    u_steps: u32,
    v_steps: u32,
) -> GeometryResult<Geometry> {
    tessellate_with(surface, u_steps, v_steps, &GeometryConfig::default())
}

/// [`tessellate`] with an explicit configuration.
pub fn tessellate_with<S: Surface + ?Sized>(
    surface: &S,
    u_steps: u32,
    v_steps: u32,
    config: &GeometryConfig,
) -> GeometryResult<Geometry> {
    let limit = config.max_tessellation_steps;
    for steps in [u_steps, v_steps] {
        if steps == 0 || steps > limit {
            return Err(GeometryError::InvalidSampling(format!(
                "step count must be in 1..={limit}, got {steps}"
            )));
        }
    }

    // Every vertex must be addressable by a u32 index; the grid arithmetic
    // below stays in range once this holds.
    let Some(vertex_count) = (u64::from(u_steps) + 1)
        .checked_mul(u64::from(v_steps) + 1)
        .filter(|&count| count <= u64::from(u32::MAX))
    else {
        return Err(GeometryError::InvalidSampling(format!(
            "{u_steps}x{v_steps} grid has more vertices than u32 indices address"
        )));
    };
    let face_count = 2 * u64::from(u_steps) * u64::from(v_steps);

    let columns = u_steps + 1;
    let mut builder = MeshBuilder::with_capacity(
        usize::try_from(vertex_count).unwrap_or(0),
        usize::try_from(face_count).unwrap_or(0),
    );

    for j in 0..=v_steps {
        let v = f64::from(j) / f64::from(v_steps);
        for i in 0..=u_steps {
            let u = f64::from(i) / f64::from(u_steps);
            builder.add(surface.position_at(Vec2::new(u, v)))?;
        }
    }

    for j in 0..v_steps {
        for i in 0..u_steps {
            let v00 = j * columns + i;
            let v10 = v00 + 1;
            let v01 = v00 + columns;
            let v11 = v01 + 1;
            builder.add_face(v00, v10, v11)?.add_face(v00, v11, v01)?;
        }
    }

    builder.freeze()
}

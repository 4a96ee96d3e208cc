//! Centralized configuration values shared across the poly-mesh workspace.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for plain floating-point comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!(EPSILON < 1.0e-6);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Relative tolerance for the coplanarity predicate.
///
/// The predicate compares a scalar triple product, which scales with the cube
/// of the coordinate magnitude. Kernels multiply this value by `L³`, where `L`
/// is the characteristic length of the geometry under test.
///
/// # Examples
/// ```
/// use config::constants::COPLANAR_RELATIVE_TOLERANCE;
/// let extent: f64 = 100.0;
/// let tolerance = COPLANAR_RELATIVE_TOLERANCE * extent.powi(3);
/// assert!(tolerance > 0.0);
/// ```
pub const COPLANAR_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Lower bound for any absolute coplanarity tolerance.
///
/// Prevents a scaled tolerance from collapsing to zero for tiny or empty
/// geometries.
///
/// # Examples
/// ```
/// use config::constants::{MIN_COPLANAR_TOLERANCE, EPSILON};
/// assert!(MIN_COPLANAR_TOLERANCE >= EPSILON);
/// ```
pub const MIN_COPLANAR_TOLERANCE: f64 = 1e-9;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of steps along one parameter axis when tessellating a
/// procedural surface.
///
/// # Examples
/// ```
/// use config::constants::MAX_TESSELLATION_STEPS;
/// assert!(MAX_TESSELLATION_STEPS >= 1024);
/// ```
pub const MAX_TESSELLATION_STEPS: u32 = 4096;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.coplanar_relative_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Relative coplanarity tolerance, scaled by `L³` in geometry kernels.
    pub coplanar_relative_tolerance: f64,
    /// Upper bound for surface tessellation steps per axis.
    pub max_tessellation_steps: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-4, 256).expect("valid config");
    /// assert_eq!(cfg.max_tessellation_steps, 256);
    /// ```
    pub fn new(
        coplanar_relative_tolerance: f64,
        max_tessellation_steps: u32,
    ) -> Result<Self, ConfigError> {
        if !coplanar_relative_tolerance.is_finite() || coplanar_relative_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(coplanar_relative_tolerance));
        }
        if max_tessellation_steps == 0 {
            return Err(ConfigError::InvalidStepLimit(max_tessellation_steps));
        }
        Ok(Self {
            coplanar_relative_tolerance,
            max_tessellation_steps,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            coplanar_relative_tolerance: COPLANAR_RELATIVE_TOLERANCE,
            max_tessellation_steps: MAX_TESSELLATION_STEPS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the tessellation step limit is zero.
    InvalidStepLimit(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidStepLimit(value) => {
                write!(f, "max_tessellation_steps must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

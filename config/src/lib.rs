//! # Config Crate
//!
//! Centralized configuration constants for the poly-mesh workspace.
//! All tolerances and tunable limits are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GlobalConfig, COPLANAR_RELATIVE_TOLERANCE, EPSILON};
//!
//! // Use EPSILON for plain floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Geometry kernels derive their coplanarity tolerance from the snapshot
//! let cfg = GlobalConfig::default();
//! assert_eq!(cfg.coplanar_relative_tolerance, COPLANAR_RELATIVE_TOLERANCE);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Scale-Aware**: Tolerances are relative and scaled by the consumer
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

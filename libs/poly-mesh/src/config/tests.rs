//! Tests covering geometry configuration behavior.

use super::*;
use crate::core::vec3::Vec3;
use config::constants::{ConfigError, COPLANAR_RELATIVE_TOLERANCE, MAX_TESSELLATION_STEPS};

#[test]
fn default_matches_constants() {
    let cfg = GeometryConfig::default();
    assert_eq!(cfg.coplanar_relative_tolerance, COPLANAR_RELATIVE_TOLERANCE);
    assert_eq!(cfg.max_tessellation_steps, MAX_TESSELLATION_STEPS);
}

#[test]
fn new_validates_input() {
    let err = GeometryConfig::new(-1.0, 24).unwrap_err();
    assert_eq!(err, GeometryError::Config(ConfigError::InvalidTolerance(-1.0)));
    assert!(GeometryConfig::new(1.0e-6, 0).is_err());
}

#[test]
fn tolerance_rejects_non_positive_values() {
    assert_eq!(Tolerance::new(0.0), Err(GeometryError::InvalidTolerance(0.0)));
    assert!(Tolerance::new(-1.0).is_err());
    assert!(Tolerance::new(f64::NAN).is_err());
}

#[test]
fn scaled_tolerance_grows_with_cube_of_length() {
    let one = Tolerance::scaled(1.0e-6, 10.0).unwrap().value();
    let ten = Tolerance::scaled(1.0e-6, 100.0).unwrap().value();
    assert!((ten / one - 1000.0).abs() < 1e-6);
}

#[test]
fn scaled_tolerance_is_floored() {
    let tol = Tolerance::scaled(1.0e-6, 0.0).unwrap();
    assert_eq!(tol.value(), MIN_COPLANAR_TOLERANCE);
}

#[test]
fn tolerance_for_empty_geometry_is_minimum() {
    let geometry = Geometry::triangles(Vec::<Vec3>::new(), vec![]).unwrap();
    let tol = GeometryConfig::default().tolerance_for(&geometry).unwrap();
    assert_eq!(tol.value(), MIN_COPLANAR_TOLERANCE);
}

//! Core vector types shared by the geometry modules.
//!
//! Includes vector aliases (`Vec2`, `Vec3`) and small positional helpers.

pub mod vec3;

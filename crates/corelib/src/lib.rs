//! Core types: math re-exports, colors, small geometry helpers.

pub use glam::{Vec2, Vec3, vec2, vec3};

pub mod color;
pub mod geometry;

pub use color::Rgba;

//! Core types shared by every generator.
//!
//! This crate provides the foundational pieces the generation library builds on:
//! - Seed arithmetic (grid seeds, hash-combine mixing)
//! - A splittable deterministic random stream
//! - RGBA pixel buffers
//! - The common error type

pub mod error;
pub mod random;
pub mod seed;
pub mod texture;

pub use error::*;
pub use random::*;
pub use seed::*;
pub use texture::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};

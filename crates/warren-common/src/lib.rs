//! # Warren Common
//!
//! Shared primitives for Warren map generation.
//!
//! This crate provides the building blocks every generation step works with:
//! - Grid coordinates ([`Point`])
//! - Axis-aligned rectangles with recursive bisection ([`Rectangle`])
//! - Arbitrary point sets with rigid rotation ([`Region`])
//! - Fixed-size 2D grids with overlay ([`Grid`])
//! - Random sources, seeded or scripted ([`RandomSource`])
//! - Common error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod grid;
pub mod random;
pub mod rect;
pub mod region;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::grid::*;
    pub use crate::random::*;
    pub use crate::rect::*;
    pub use crate::region::*;
}

pub use prelude::*;

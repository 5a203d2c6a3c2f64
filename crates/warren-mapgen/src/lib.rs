//! # Warren Map Generation
//!
//! Procedural 2D walkability maps built by a pipeline of steps sharing a
//! tagged component store.
//!
//! This crate provides:
//! - The component store steps read from and write to ([`GenerationContext`])
//! - The step contract and progress reporting ([`GenerationStep`])
//! - A sequential runner ([`Pipeline`])
//! - Generators: cave smoothing, backrooms, maze, spiral, parallelograms
//! - The rotated-region compositor ([`CompositeStep`])
//! - File-backed settings ([`GeneratorConfig`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod context;
pub mod item_list;
pub mod pipeline;
pub mod step;
pub mod steps;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::context::*;
    pub use crate::item_list::*;
    pub use crate::pipeline::*;
    pub use crate::step::*;
    pub use crate::steps::{
        BackroomsStep, CaveSmoothingStep, CompositeStep, InvertStep, MazeStep, ParallelogramStep,
        RandomFillStep, SpiralStep,
    };
}

pub use prelude::*;

//! Generation steps.
//!
//! Leaf generators write a full-map `Grid<bool>` (`true` = floor) under
//! their tag. The cave automaton works on a wall grid and is turned into a
//! walkability grid by [`InvertStep`]. The compositor blends any of them.

pub mod backrooms;
pub mod cave;
pub mod composite;
pub mod fill;
pub mod maze;
pub mod parallelogram;
pub mod spiral;

pub use backrooms::BackroomsStep;
pub use cave::CaveSmoothingStep;
pub use composite::CompositeStep;
pub use fill::{InvertStep, RandomFillStep};
pub use maze::MazeStep;
pub use parallelogram::ParallelogramStep;
pub use spiral::SpiralStep;

//! Error types for Warren map generation.

use thiserror::Error;

/// Top-level error type for generation operations.
///
/// Any error aborts the pipeline run it occurred in; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarrenError {
    /// A step asked for a component no earlier step produced
    #[error("Missing component {type_name} with tag {tag:?}")]
    MissingComponent {
        /// Rust type name of the requested component
        type_name: &'static str,
        /// Tag the component was requested under
        tag: Option<String>,
    },

    /// Coordinate access outside a grid's extents
    #[error("Position ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Overlay between grids of different sizes
    #[error("Grid extent mismatch: expected {expected:?}, got {actual:?}")]
    ExtentMismatch {
        /// Extent of the destination grid
        expected: (usize, usize),
        /// Extent of the source grid
        actual: (usize, usize),
    },
}

impl WarrenError {
    /// Builds a [`WarrenError::MissingComponent`] for type `T`.
    #[must_use]
    pub fn missing<T: ?Sized>(tag: Option<&str>) -> Self {
        Self::MissingComponent {
            type_name: std::any::type_name::<T>(),
            tag: tag.map(str::to_owned),
        }
    }
}

/// Result type alias for generation operations.
pub type WarrenResult<T> = Result<T, WarrenError>;

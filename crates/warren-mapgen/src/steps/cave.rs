//! Cellular-automaton cave smoothing.
//!
//! Operates on a wall grid (`true` = wall). Each pass counts walls in the
//! 3×3 block around every cell, with out-of-bounds cells counting as wall:
//! - a wall stays a wall with at least 4 wall neighbours
//! - a floor becomes a wall with at least 5 wall neighbours
//!
//! New states go to a scratch grid, which is overlaid onto the live grid only
//! after every cell has been evaluated.

use tracing::debug;
use warren_common::{Grid, Point, RandomSource, WarrenResult};

use crate::context::GenerationContext;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

/// Wall neighbours a wall needs to survive.
pub const SURVIVE_THRESHOLD: usize = 4;

/// Wall neighbours a floor needs to become a wall.
pub const BIRTH_THRESHOLD: usize = 5;

/// Smooths an existing wall grid in place.
#[derive(Debug, Clone)]
pub struct CaveSmoothingStep {
    tag: String,
    passes: u32,
}

impl Default for CaveSmoothingStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CaveSmoothingStep {
    /// Tag of the wall grid read by default.
    pub const DEFAULT_TAG: &'static str = "cave-walls";

    /// Creates a single-pass step over [`Self::DEFAULT_TAG`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_owned(),
            passes: 1,
        }
    }

    /// Reads and writes the wall grid stored under `tag` instead.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Number of passes to run, each committed before the next starts.
    #[must_use]
    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    /// Tag of the wall grid.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Counts wall cells around `point`, treating anything off the grid as wall.
#[must_use]
pub fn wall_neighbors(walls: &Grid<bool>, point: Point) -> usize {
    point
        .neighbors()
        .iter()
        .filter(|n| walls.get(**n).copied().unwrap_or(true))
        .count()
}

/// Next-generation state of one cell.
#[must_use]
pub fn next_state(walls: &Grid<bool>, point: Point) -> bool {
    let count = wall_neighbors(walls, point);
    if walls.get(point).copied().unwrap_or(true) {
        count >= SURVIVE_THRESHOLD
    } else {
        count >= BIRTH_THRESHOLD
    }
}

impl GenerationStep for CaveSmoothingStep {
    fn name(&self) -> &str {
        "cave-smoothing"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        _rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let walls = context.get_mut::<Grid<bool>>(Some(self.tag.as_str()))?;
        let (width, height) = walls.extent();

        for pass in 0..self.passes {
            let mut scratch = Grid::filled(width, height, true);
            for y in 0..height {
                for x in 0..width {
                    let point = Point::new(x as i32, y as i32);
                    scratch.set(point, next_state(walls, point))?;
                }
                observer.on_progress(&StepProgress {
                    step: self.name(),
                    unit: ProgressUnit::Row,
                    index: y,
                });
            }
            walls.overlay(&scratch)?;

            debug!(
                "Smoothing pass {pass} left {} walls",
                walls.count(|wall| *wall)
            );
            observer.on_progress(&StepProgress {
                step: self.name(),
                unit: ProgressUnit::Pass,
                index: pass as usize,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_common::{FixedSequence, WarrenError};

    fn smooth(grid: Grid<bool>, passes: u32) -> Grid<bool> {
        let mut context = GenerationContext::new(grid.width(), grid.height());
        context.insert(Some(CaveSmoothingStep::DEFAULT_TAG), grid);
        CaveSmoothingStep::new()
            .with_passes(passes)
            .perform(
                &mut context,
                &mut FixedSequence::default(),
                &mut |_: &StepProgress<'_>| {},
            )
            .expect("smoothing");
        context
            .take::<Grid<bool>>(Some(CaveSmoothingStep::DEFAULT_TAG))
            .expect("grid")
    }

    #[test]
    fn test_all_wall_is_fixed_point() {
        let walls = Grid::filled(7, 5, true);
        assert_eq!(smooth(walls.clone(), 3), walls);
    }

    #[test]
    fn test_all_floor_only_corners_flip() {
        let result = smooth(Grid::filled(5, 5, false), 1);
        // corners see 5 out-of-bounds walls; edges see 3; interior none
        for point in result.positions() {
            let corner = (point.x == 0 || point.x == 4) && (point.y == 0 || point.y == 4);
            assert_eq!(result.get(point), Some(&corner), "at {point}");
        }
    }

    #[test]
    fn test_single_cell_becomes_wall() {
        let result = smooth(Grid::filled(1, 1, false), 1);
        assert_eq!(result.get(Point::ZERO), Some(&true));
    }

    #[test]
    fn test_isolated_wall_erodes() {
        let mut walls = Grid::filled(5, 5, false);
        walls.set(Point::new(2, 2), true).expect("in bounds");
        let result = smooth(walls, 1);
        assert_eq!(result.get(Point::new(2, 2)), Some(&false));
    }

    #[test]
    fn test_counts_use_previous_generation() {
        let mut rng = fastrand::Rng::with_seed(99);
        let mut walls = Grid::filled(16, 12, false);
        for point in walls.bounds().positions() {
            walls.set(point, rng.bool()).expect("in bounds");
        }

        let mut expected = walls.clone();
        for point in walls.positions() {
            expected.set(point, next_state(&walls, point)).expect("in bounds");
        }

        assert_eq!(smooth(walls, 1), expected);
    }

    #[test]
    fn test_reports_rows_then_pass() {
        let mut context = GenerationContext::new(3, 2);
        context.insert(Some("walls"), Grid::filled(3, 2, true));
        let mut events = Vec::new();
        CaveSmoothingStep::new()
            .with_tag("walls")
            .perform(
                &mut context,
                &mut FixedSequence::default(),
                &mut |p: &StepProgress<'_>| events.push((p.unit, p.index)),
            )
            .expect("smoothing");
        assert_eq!(
            events,
            vec![
                (ProgressUnit::Row, 0),
                (ProgressUnit::Row, 1),
                (ProgressUnit::Pass, 0)
            ]
        );
    }

    #[test]
    fn test_missing_wall_grid() {
        let mut context = GenerationContext::new(3, 3);
        let err = CaveSmoothingStep::new()
            .perform(
                &mut context,
                &mut FixedSequence::default(),
                &mut |_: &StepProgress<'_>| {},
            )
            .expect_err("no wall grid");
        assert!(matches!(err, WarrenError::MissingComponent { .. }));
    }
}

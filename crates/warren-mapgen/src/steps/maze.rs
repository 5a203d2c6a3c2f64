//! Recursive-backtracker maze.

use tracing::debug;
use warren_common::{Grid, Point, RandomSource, WarrenResult};

use crate::context::GenerationContext;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

const DIRECTIONS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Carves a perfect maze of one-cell corridors (`true` = floor).
///
/// Junction cells sit on odd coordinates; the outer border stays wall.
#[derive(Debug, Clone)]
pub struct MazeStep {
    tag: String,
}

impl Default for MazeStep {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeStep {
    /// Default output tag.
    pub const DEFAULT_TAG: &'static str = "maze";

    /// Creates the step writing to [`Self::DEFAULT_TAG`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_owned(),
        }
    }

    /// Writes the maze under `tag` instead.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

fn is_junction(grid: &Grid<bool>, point: Point) -> bool {
    point.x % 2 == 1
        && point.y % 2 == 1
        && point.x < grid.width() as i32 - 1
        && point.y < grid.height() as i32 - 1
        && grid.contains(point)
}

impl GenerationStep for MazeStep {
    fn name(&self) -> &str {
        "maze"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let (width, height) = (context.width(), context.height());
        let mut scratch = Grid::filled(width, height, false);

        let columns = (width.saturating_sub(1) / 2) as i32;
        let rows = (height.saturating_sub(1) / 2) as i32;
        if columns > 0 && rows > 0 {
            let start = Point::new(rng.range(0, columns) * 2 + 1, rng.range(0, rows) * 2 + 1);
            scratch.set(start, true)?;
            let mut stack = vec![start];
            let mut carved = 0;

            while let Some(&current) = stack.last() {
                let options: Vec<Point> = DIRECTIONS
                    .iter()
                    .map(|d| Point::new(current.x + d.x * 2, current.y + d.y * 2))
                    .filter(|&next| {
                        is_junction(&scratch, next) && scratch.get(next) == Some(&false)
                    })
                    .collect();

                if options.is_empty() {
                    stack.pop();
                    continue;
                }

                let next = options[rng.range(0, options.len() as i32) as usize];
                let between = Point::new((current.x + next.x) / 2, (current.y + next.y) / 2);
                scratch.set(between, true)?;
                scratch.set(next, true)?;
                stack.push(next);

                observer.on_progress(&StepProgress {
                    step: self.name(),
                    unit: ProgressUnit::Cell,
                    index: carved,
                });
                carved += 1;
            }
            debug!("Maze carved {carved} passages");
        }

        context
            .get_or_create(Some(self.tag.as_str()), || Grid::<bool>::new(width, height))?
            .overlay(&scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    fn maze(width: usize, height: usize, seed: u64) -> Grid<bool> {
        let mut context = GenerationContext::new(width, height);
        MazeStep::new()
            .perform(
                &mut context,
                &mut fastrand::Rng::with_seed(seed),
                &mut |_: &StepProgress<'_>| {},
            )
            .expect("maze");
        context
            .take::<Grid<bool>>(Some(MazeStep::DEFAULT_TAG))
            .expect("grid")
    }

    fn reachable(grid: &Grid<bool>, start: Point) -> HashSet<Point> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(point) = queue.pop_front() {
            for d in DIRECTIONS {
                let next = point + d;
                if grid.get(next) == Some(&true) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_every_junction_connected() {
        let grid = maze(21, 15, 4);
        let reached = reachable(&grid, Point::new(1, 1));
        for y in (1..14).step_by(2) {
            for x in (1..20).step_by(2) {
                assert!(reached.contains(&Point::new(x, y)), "({x}, {y}) unreachable");
            }
        }
        assert_eq!(reached.len(), grid.count(|c| *c));
    }

    #[test]
    fn test_border_stays_wall() {
        let grid = maze(12, 9, 8);
        for point in grid.bounds().perimeter_positions() {
            assert_eq!(grid.get(point), Some(&false), "{point}");
        }
    }

    #[test]
    fn test_perfect_maze_has_no_cycles() {
        // a spanning tree over n junctions carves exactly n - 1 passages
        let grid = maze(15, 11, 21);
        let junctions = 7 * 5;
        assert_eq!(grid.count(|c| *c), junctions + junctions - 1);
    }

    #[test]
    fn test_tiny_map_is_solid() {
        let grid = maze(2, 2, 1);
        assert_eq!(grid.count(|c| *c), 0);
    }
}

//! Square spiral corridor.

use warren_common::{Grid, Point, RandomSource, WarrenResult};

use crate::context::GenerationContext;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

/// Clockwise turn order on a y-down grid: east, south, west, north.
const TURNS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
];

/// Carves one corridor spiralling out from the map centre (`true` = floor).
///
/// Segment lengths grow by two every second turn, which leaves a one-cell
/// wall between neighbouring loops. The starting direction is random.
#[derive(Debug, Clone)]
pub struct SpiralStep {
    tag: String,
}

impl Default for SpiralStep {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiralStep {
    /// Default output tag.
    pub const DEFAULT_TAG: &'static str = "spiral";

    /// Creates the step writing to [`Self::DEFAULT_TAG`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_owned(),
        }
    }

    /// Writes the spiral under `tag` instead.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

impl GenerationStep for SpiralStep {
    fn name(&self) -> &str {
        "spiral"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let (width, height) = (context.width(), context.height());
        let bounds = context.bounds();
        let mut scratch = Grid::filled(width, height, false);

        let mut position = bounds.center();
        let mut turn = rng.range(0, 4) as usize;
        let limit = 2 * (width + height) as i32 + 2;
        let mut length = 2;
        let mut segment = 0;

        if bounds.contains(position) {
            scratch.set(position, true)?;
        }
        while length <= limit {
            for _ in 0..2 {
                let direction = TURNS[turn % TURNS.len()];
                for _ in 0..length {
                    position = position + direction;
                    if bounds.contains(position) {
                        scratch.set(position, true)?;
                    }
                }
                turn += 1;
                observer.on_progress(&StepProgress {
                    step: self.name(),
                    unit: ProgressUnit::Cell,
                    index: segment,
                });
                segment += 1;
            }
            length += 2;
        }

        context
            .get_or_create(Some(self.tag.as_str()), || Grid::<bool>::new(width, height))?
            .overlay(&scratch)
    }
}

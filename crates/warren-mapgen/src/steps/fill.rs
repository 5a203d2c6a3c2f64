//! Random fill and inversion of boolean grids.

use warren_common::{Grid, RandomSource, WarrenResult};

use crate::context::GenerationContext;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

/// Sets each cell to `true` with a fixed probability.
///
/// Used to seed the cave automaton with noise before smoothing.
#[derive(Debug, Clone)]
pub struct RandomFillStep {
    tag: String,
    probability: f64,
    border: Option<bool>,
}

impl RandomFillStep {
    /// Fills the grid under `tag`, each cell `true` with `probability`.
    #[must_use]
    pub fn new(tag: impl Into<String>, probability: f64) -> Self {
        Self {
            tag: tag.into(),
            probability: probability.clamp(0.0, 1.0),
            border: None,
        }
    }

    /// Forces every perimeter cell to `value` instead of rolling it.
    #[must_use]
    pub fn with_border(mut self, value: bool) -> Self {
        self.border = Some(value);
        self
    }
}

impl GenerationStep for RandomFillStep {
    fn name(&self) -> &str {
        "random-fill"
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

        for (index, point) in bounds.positions().enumerate() {
            let value = match self.border {
                Some(value) if bounds.is_perimeter(point) => value,
                _ => rng.chance(self.probability),
            };
            scratch.set(point, value)?;

            if width > 0 && (index + 1) % width == 0 {
                observer.on_progress(&StepProgress {
                    step: self.name(),
                    unit: ProgressUnit::Row,
                    index: index / width,
                });
            }
        }

        context
            .get_or_create(Some(self.tag.as_str()), || Grid::<bool>::new(width, height))?
            .overlay(&scratch)
    }
}

/// Writes the negation of one boolean grid under another tag.
#[derive(Debug, Clone)]
pub struct InvertStep {
    source: String,
    target: String,
}

impl InvertStep {
    /// Inverts the grid under `source` into `target`.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl GenerationStep for InvertStep {
    fn name(&self) -> &str {
        "invert"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        _rng: &mut dyn RandomSource,
        _observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let inverted = context
            .get::<Grid<bool>>(Some(self.source.as_str()))?
            .map(|cell| !cell);
        let (width, height) = inverted.extent();
        context
            .get_or_create(Some(self.target.as_str()), || Grid::<bool>::new(width, height))?
            .overlay(&inverted)
    }
}

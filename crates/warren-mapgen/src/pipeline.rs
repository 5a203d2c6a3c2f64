//! Sequential step runner.
//!
//! # Example
//!
//! ```
//! use warren_common::Grid;
//! use warren_mapgen::{BackroomsStep, Pipeline};
//!
//! let context = Pipeline::new(40, 20)
//!     .with_seed(7)
//!     .add_step(BackroomsStep::new())
//!     .run()
//!     .expect("generation failed");
//!
//! let map = context.get::<Grid<bool>>(Some("backrooms")).expect("map");
//! assert_eq!(map.extent(), (40, 20));
//! ```

use tracing::{debug, debug_span, info, warn};
use warren_common::{RandomSource, WarrenResult};

use crate::context::GenerationContext;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

/// Ordered list of generation steps run against a fresh context.
pub struct Pipeline {
    /// Map width in cells
    width: usize,
    /// Map height in cells
    height: usize,
    /// Seed for reproducible runs (None = random)
    seed: Option<u64>,
    /// Steps in execution order
    steps: Vec<Box<dyn GenerationStep>>,
}

impl Pipeline {
    /// Creates an empty pipeline for a map of the given size.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_steps(width, height, Vec::new())
    }

    /// Creates a pipeline from already boxed steps.
    #[must_use]
    pub fn from_steps(width: usize, height: usize, steps: Vec<Box<dyn GenerationStep>>) -> Self {
        Self {
            width,
            height,
            seed: None,
            steps,
        }
    }

    /// Makes every run of this pipeline reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Appends a step. Ordering is the caller's responsibility.
    #[must_use]
    pub fn add_step(mut self, step: impl GenerationStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Appends an already boxed step.
    pub fn push_step(&mut self, step: Box<dyn GenerationStep>) {
        self.steps.push(step);
    }

    /// Gives the steps back, e.g. to reuse them in another pipeline.
    #[must_use]
    pub fn into_steps(self) -> Vec<Box<dyn GenerationStep>> {
        self.steps
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.name())
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Runs every step in order and returns the finished context.
    pub fn run(&mut self) -> WarrenResult<GenerationContext> {
        self.run_with_observer(&mut |_: &StepProgress<'_>| {})
    }

    /// Like [`Pipeline::run`], reporting each suspension point to `observer`.
    pub fn run_with_observer(
        &mut self,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<GenerationContext> {
        let mut rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        self.run_with(&mut rng, observer)
    }

    /// Runs with a caller supplied random source.
    ///
    /// The first failing step aborts the run; its error is returned and the
    /// partially built context is discarded.
    pub fn run_with(
        &mut self,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<GenerationContext> {
        let mut context = GenerationContext::new(self.width, self.height);
        info!(
            "Generating {}x{} map with {} steps",
            self.width,
            self.height,
            self.steps.len()
        );

        for (index, step) in self.steps.iter_mut().enumerate() {
            let span = debug_span!("step", name = step.name());
            let _guard = span.enter();
            debug!("Running step {index}");

            if let Err(e) = step.perform(&mut context, rng, observer) {
                warn!("Step {} failed: {e}", step.name());
                return Err(e);
            }

            observer.on_progress(&StepProgress {
                step: step.name(),
                unit: ProgressUnit::Step,
                index,
            });
        }

        info!("Generation finished with {} components", context.len());
        Ok(context)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("seed", &self.seed)
            .field("steps", &self.step_names().collect::<Vec<_>>())
            .finish()
    }
}

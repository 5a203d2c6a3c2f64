//! The generation step capability and progress observation.

use warren_common::{RandomSource, WarrenResult};

use crate::context::GenerationContext;

/// Kind of work unit a step just finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressUnit {
    /// One grid row evaluated into a scratch buffer
    Row,
    /// One full smoothing pass committed
    Pass,
    /// One room drawn
    Room,
    /// One composited region written
    Region,
    /// One cell carved
    Cell,
    /// A whole step completed
    Step,
}

/// A suspension point reported by a running step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress<'a> {
    /// Name of the reporting step
    pub step: &'a str,
    /// What was just finished
    pub unit: ProgressUnit,
    /// Zero-based index of that unit within the step
    pub index: usize,
}

/// Receives progress reports for visualisation or single-stepping.
///
/// State is self-consistent whenever an observer is called. Observers
/// cannot influence the run; they only watch it.
pub trait ProgressObserver {
    /// Called after each logical unit of work.
    fn on_progress(&mut self, progress: &StepProgress<'_>);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&StepProgress<'_>),
{
    fn on_progress(&mut self, progress: &StepProgress<'_>) {
        self(progress);
    }
}

/// A unit of work in a generation pipeline.
///
/// A step reads the components it needs from the context, computes into
/// scratch storage, and commits its result back under its own tag. Steps
/// run strictly one at a time, each to completion.
pub trait GenerationStep {
    /// Human readable name used in logs and progress reports.
    fn name(&self) -> &str;

    /// Runs the step against the shared context.
    fn perform(
        &mut self,
        context: &mut GenerationContext,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()>;
}

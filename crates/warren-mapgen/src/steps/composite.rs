//! Rotated-region compositor.
//!
//! Runs an isolated nested pipeline that produces one full-map candidate
//! grid per tag, partitions a square around the map into rectangles by
//! recursive bisection, rotates every rectangle about the map centre, and
//! paints each surviving region from one randomly chosen candidate.
//! Regions are painted in partition order; where rotated regions overlap
//! the later one wins.

use glam::DVec2;
use tracing::{debug, trace, warn};
use warren_common::{Grid, Point, RandomSource, Rectangle, Region, WarrenResult};

use crate::context::GenerationContext;
use crate::pipeline::Pipeline;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};
use crate::steps::{
    BackroomsStep, CaveSmoothingStep, InvertStep, MazeStep, ParallelogramStep, RandomFillStep,
    SpiralStep,
};

/// Default rotation applied to every region, in degrees.
pub const DEFAULT_ROTATION: f64 = 45.0;

/// Default minimum side length of a partition rectangle.
pub const DEFAULT_REGION_MIN_DIMENSION: i32 = 8;

/// Default probability of a wall in the cave's initial noise.
pub const DEFAULT_CAVE_FILL: f64 = 0.45;

/// Default number of cave smoothing passes.
pub const DEFAULT_CAVE_PASSES: u32 = 4;

/// Tag of the cave candidate's walkability grid.
pub const CAVE_TAG: &str = "cave";

/// Blends several independently generated layouts into one map.
pub struct CompositeStep {
    tag: String,
    rotation: f64,
    min_region_dimension: i32,
    /// Candidate grid tags, in choice order
    candidate_tags: Vec<String>,
    /// Steps of the nested pipeline, in execution order
    nested_steps: Vec<Box<dyn GenerationStep>>,
}

impl Default for CompositeStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeStep {
    /// Tag the composite grid is written to.
    pub const DEFAULT_TAG: &'static str = "composite";

    /// Creates the compositor with the five standard candidates:
    /// maze, backrooms, parallelograms, spiral and cave.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cave(DEFAULT_CAVE_FILL, DEFAULT_CAVE_PASSES)
    }

    /// Standard candidates with a tuned cave.
    #[must_use]
    pub fn with_cave(fill_probability: f64, smoothing_passes: u32) -> Self {
        Self::empty()
            .with_candidate(MazeStep::DEFAULT_TAG, vec![Box::new(MazeStep::new())])
            .with_candidate(
                BackroomsStep::DEFAULT_TAG,
                vec![Box::new(BackroomsStep::new())],
            )
            .with_candidate(
                ParallelogramStep::DEFAULT_TAG,
                vec![Box::new(ParallelogramStep::new())],
            )
            .with_candidate(SpiralStep::DEFAULT_TAG, vec![Box::new(SpiralStep::new())])
            .with_candidate(
                CAVE_TAG,
                vec![
                    Box::new(
                        RandomFillStep::new(CaveSmoothingStep::DEFAULT_TAG, fill_probability)
                            .with_border(true),
                    ),
                    Box::new(CaveSmoothingStep::new().with_passes(smoothing_passes)),
                    Box::new(InvertStep::new(CaveSmoothingStep::DEFAULT_TAG, CAVE_TAG)),
                ],
            )
    }

    /// Creates a compositor with no candidates.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_owned(),
            rotation: DEFAULT_ROTATION,
            min_region_dimension: DEFAULT_REGION_MIN_DIMENSION,
            candidate_tags: Vec::new(),
            nested_steps: Vec::new(),
        }
    }

    /// Adds a candidate: `steps` run in the nested pipeline and must leave a
    /// walkability grid under `tag`.
    #[must_use]
    pub fn with_candidate(
        mut self,
        tag: impl Into<String>,
        steps: Vec<Box<dyn GenerationStep>>,
    ) -> Self {
        self.candidate_tags.push(tag.into());
        self.nested_steps.extend(steps);
        self
    }

    /// Writes the composite under `tag` instead.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Rotation applied to every region, in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Minimum side length of partition rectangles.
    #[must_use]
    pub fn with_min_region_dimension(mut self, min_dimension: i32) -> Self {
        self.min_region_dimension = min_dimension.max(1);
        self
    }

    /// Candidate tags in choice order.
    pub fn candidate_tags(&self) -> impl Iterator<Item = &str> {
        self.candidate_tags.iter().map(String::as_str)
    }

    /// Runs the candidate steps in their own pipeline and context.
    fn generate_candidates(
        &mut self,
        width: usize,
        height: usize,
        seed: u64,
    ) -> WarrenResult<GenerationContext> {
        let mut nested =
            Pipeline::from_steps(width, height, std::mem::take(&mut self.nested_steps))
                .with_seed(seed);
        let outcome = nested.run();
        self.nested_steps = nested.into_steps();
        outcome
    }
}

impl std::fmt::Debug for CompositeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeStep")
            .field("tag", &self.tag)
            .field("rotation", &self.rotation)
            .field("min_region_dimension", &self.min_region_dimension)
            .field("candidate_tags", &self.candidate_tags)
            .finish_non_exhaustive()
    }
}

/// The square that is partitioned into regions.
///
/// Nominally three map widths by three map heights centred on the map. It
/// grows when the map, rotated back about `pivot`, would poke out of it.
#[must_use]
pub fn partition_area(width: i32, height: i32, degrees: f64, pivot: Point) -> Rectangle {
    let nominal = Rectangle::new(-width, -height, width * 3, height * 3);
    let inverse = DVec2::from_angle(-degrees.to_radians());
    let origin = DVec2::new(f64::from(pivot.x), f64::from(pivot.y));

    let corners = [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)]
        .map(|(x, y)| inverse.rotate(DVec2::new(f64::from(x), f64::from(y)) - origin) + origin);
    let (min, max) = corners
        .iter()
        .fold((origin, origin), |(min, max), c| (min.min(*c), max.max(*c)));

    // one cell of slack for rounding
    let min_x = nominal.min_x().min(min.x.floor() as i32 - 1);
    let min_y = nominal.min_y().min(min.y.floor() as i32 - 1);
    let max_x = nominal.max_x().max(max.x.ceil() as i32 + 1);
    let max_y = nominal.max_y().max(max.y.ceil() as i32 + 1);
    Rectangle::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y))
}

/// Partitions the area around the map into rotated regions.
///
/// Regions with no point inside the map are dropped. Together the returned
/// regions cover every cell of the map.
pub fn partition_regions<R: RandomSource + ?Sized>(
    width: i32,
    height: i32,
    degrees: f64,
    min_dimension: i32,
    rng: &mut R,
) -> Vec<Region> {
    let map = Rectangle::new(0, 0, width, height);
    let pivot = Point::new(width / 2, height / 2);
    partition_area(width, height, degrees, pivot)
        .bisect_recursive(min_dimension, rng)
        .map(|rect| Region::from_rectangle(&rect).rotate(degrees, pivot))
        .filter(|region| region.intersects(&map))
        .collect()
}

impl GenerationStep for CompositeStep {
    fn name(&self) -> &str {
        "composite"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let (width, height) = (context.width(), context.height());
        if self.candidate_tags.is_empty() {
            warn!("Composite step has no candidates, map left as walls");
            context.get_or_create(Some(self.tag.as_str()), || Grid::<bool>::new(width, height))?;
            return Ok(());
        }

        let candidates = self.generate_candidates(width, height, rng.next_u64())?;
        let sources = self
            .candidate_tags
            .iter()
            .map(|tag| candidates.get::<Grid<bool>>(Some(tag.as_str())))
            .collect::<WarrenResult<Vec<_>>>()?;

        let regions = partition_regions(
            width as i32,
            height as i32,
            self.rotation,
            self.min_region_dimension,
            rng,
        );
        debug!(
            "Compositing {} regions from {} candidates",
            regions.len(),
            sources.len()
        );

        let map = context
            .get_or_create(Some(self.tag.as_str()), || Grid::<bool>::new(width, height))?;
        let bounds = map.bounds();
        for (index, region) in regions.iter().enumerate() {
            let choice = rng.range(0, sources.len() as i32) as usize;
            let source = sources[choice];
            for point in region.points().filter(|p| bounds.contains(*p)) {
                map.set(point, *source.cell(point)?)?;
            }

            trace!("Region {index} painted from {}", self.candidate_tags[choice]);
            observer.on_progress(&StepProgress {
                step: "composite",
                unit: ProgressUnit::Region,
                index,
            });
        }
        Ok(())
    }
}

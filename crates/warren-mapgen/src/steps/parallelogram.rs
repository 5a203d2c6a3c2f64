//! Slanted parallelogram rooms in a brick pattern.

use tracing::trace;
use warren_common::{Grid, Point, RandomSource, WarrenResult};

use crate::context::GenerationContext;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

/// Bands of parallelogram rooms leaning one cell per row (`true` = floor).
///
/// Rooms in a band share their slanted side walls and consecutive bands
/// share their horizontal walls. Band heights and room widths are random.
#[derive(Debug, Clone)]
pub struct ParallelogramStep {
    tag: String,
    band_height: (i32, i32),
    room_width: (i32, i32),
}

impl Default for ParallelogramStep {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelogramStep {
    /// Default output tag.
    pub const DEFAULT_TAG: &'static str = "parallelograms";

    /// Creates the step writing to [`Self::DEFAULT_TAG`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_owned(),
            band_height: (4, 8),
            room_width: (4, 10),
        }
    }

    /// Writes the rooms under `tag` instead.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Half-open ranges for band height and room width (both at least 3).
    #[must_use]
    pub fn with_sizes(mut self, band_height: (i32, i32), room_width: (i32, i32)) -> Self {
        self.band_height = (band_height.0.max(3), band_height.1.max(band_height.0.max(3) + 1));
        self.room_width = (room_width.0.max(3), room_width.1.max(room_width.0.max(3) + 1));
        self
    }
}

/// Draws one parallelogram whose top row starts at `origin`.
fn draw_room(grid: &mut Grid<bool>, origin: Point, width: i32, height: i32) -> WarrenResult<()> {
    for row in 0..height {
        for col in 0..width {
            let point = Point::new(origin.x + col + row, origin.y + row);
            if grid.contains(point) {
                let edge = row == 0 || row == height - 1 || col == 0 || col == width - 1;
                grid.set(point, !edge)?;
            }
        }
    }
    Ok(())
}

impl GenerationStep for ParallelogramStep {
    fn name(&self) -> &str {
        "parallelograms"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let (width, height) = (context.width(), context.height());
        let mut scratch = Grid::filled(width, height, false);

        let mut top = 0;
        let mut band = 0;
        while top < height as i32 - 1 {
            let band_height = rng.range(self.band_height.0, self.band_height.1);
            // start left of the map so the slant still covers column zero
            let mut left = -band_height;
            while left < width as i32 {
                let room_width = rng.range(self.room_width.0, self.room_width.1);
                draw_room(&mut scratch, Point::new(left, top), room_width, band_height)?;
                trace!("Parallelogram at ({left}, {top}) {room_width}x{band_height}");
                left += room_width - 1;
            }

            observer.on_progress(&StepProgress {
                step: self.name(),
                unit: ProgressUnit::Row,
                index: band,
            });
            band += 1;
            top += band_height - 1;
        }

        context
            .get_or_create(Some(self.tag.as_str()), || Grid::<bool>::new(width, height))?
            .overlay(&scratch)
    }
}

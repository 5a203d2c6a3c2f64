//! Recursive-bisection room layout ("backrooms").
//!
//! The map is covered by four large rectangles: a spine spanning the full
//! width or height and three bands crossing it. Each large rectangle is
//! bisected into rooms; every room gets a wall perimeter and a floor
//! interior. Rooms are painted in order and later writes win, so where
//! rectangles overlap the later room decides wall versus floor. That draw
//! order is what opens doorways and must be preserved.

use tracing::{debug, trace};
use warren_common::{Grid, RandomSource, Rectangle, WarrenResult};

use crate::context::GenerationContext;
use crate::item_list::ItemList;
use crate::step::{GenerationStep, ProgressObserver, ProgressUnit, StepProgress};

/// Tag every generated room is recorded under.
pub const ROOM_ITEM_TAG: &str = "backroom";

/// Smallest minimum room dimension drawn per run (inclusive).
pub const MIN_ROOM_DIMENSION: i32 = 3;

/// Largest minimum room dimension drawn per run (exclusive).
pub const MAX_ROOM_DIMENSION: i32 = 9;

/// Brick-work rooms carved by recursive bisection.
#[derive(Debug, Clone)]
pub struct BackroomsStep {
    tag: String,
}

impl Default for BackroomsStep {
    fn default() -> Self {
        Self::new()
    }
}

impl BackroomsStep {
    /// Tag of the walkability grid and of the room list.
    pub const DEFAULT_TAG: &'static str = "backrooms";

    /// Creates the step writing to [`Self::DEFAULT_TAG`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_owned(),
        }
    }

    /// Writes the grid and room list under `tag` instead.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Tag of the produced grid and room list.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Picks one of the four large-scale layouts.
///
/// Returns the spine first, then the three bands crossing it. Neighbouring
/// rectangles share their touching row or column.
pub fn large_rooms<R: RandomSource + ?Sized>(
    width: i32,
    height: i32,
    rng: &mut R,
) -> [Rectangle; 4] {
    let third_width = width / 3;
    let half_width = width / 2;
    let third_height = height / 3;
    let half_height = height / 2;

    match rng.range(0, 4) {
        // vertical spine on the right, bands on the left
        0 => [
            Rectangle::new(half_width - 1, 0, half_width, height),
            Rectangle::new(0, 0, half_width, third_height),
            Rectangle::new(0, third_height - 1, half_width, third_height),
            Rectangle::new(0, third_height * 2 - 1, half_width, third_height),
        ],
        // vertical spine on the left, bands on the right
        1 => [
            Rectangle::new(0, 0, half_width, height),
            Rectangle::new(half_width - 1, 0, half_width, third_height),
            Rectangle::new(half_width - 1, third_height - 1, half_width, third_height),
            Rectangle::new(half_width - 1, third_height * 2 - 1, half_width, third_height),
        ],
        // horizontal spine on top, bands below
        2 => [
            Rectangle::new(0, 0, width, half_height),
            Rectangle::new(0, half_height - 1, third_width, half_height),
            Rectangle::new(third_width - 1, half_height - 1, third_width, half_height),
            Rectangle::new(third_width * 2 - 1, half_height - 1, third_width, half_height),
        ],
        // horizontal spine at the bottom, bands above
        _ => [
            Rectangle::new(0, half_height - 1, width, half_height),
            Rectangle::new(0, 0, third_width, half_height),
            Rectangle::new(third_width - 1, 0, third_width, half_height),
            Rectangle::new(third_width * 2 - 1, 0, third_width, half_height),
        ],
    }
}

/// Paints rooms onto `map` in order: perimeter walls, then floor interior.
pub fn paint_rooms<'a>(
    map: &mut Grid<bool>,
    rooms: impl IntoIterator<Item = &'a Rectangle>,
    mut on_room: impl FnMut(usize),
) -> WarrenResult<()> {
    for (index, room) in rooms.into_iter().enumerate() {
        for point in room.perimeter_positions() {
            map.set(point, false)?;
        }
        for point in room.interior_positions() {
            map.set(point, true)?;
        }
        on_room(index);
    }
    Ok(())
}

impl GenerationStep for BackroomsStep {
    fn name(&self) -> &str {
        "backrooms"
    }

    fn perform(
        &mut self,
        context: &mut GenerationContext,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ProgressObserver,
    ) -> WarrenResult<()> {
        let (width, height) = (context.width(), context.height());
        let layout = large_rooms(width as i32, height as i32, rng);
        let min_dimension = rng.range(MIN_ROOM_DIMENSION, MAX_ROOM_DIMENSION);
        debug!("Backrooms layout {layout:?}, minimum room dimension {min_dimension}");

        let mut rooms = ItemList::new();
        for large in &layout {
            rooms.add_range(large.bisect_recursive(min_dimension, rng), ROOM_ITEM_TAG);
        }

        let name = self.name();
        let map = context.get_or_create(Some(self.tag.as_str()), || {
            Grid::<bool>::new(width, height)
        })?;
        paint_rooms(map, rooms.items(), |index| {
            trace!("Painted room {index}");
            observer.on_progress(&StepProgress {
                step: name,
                unit: ProgressUnit::Room,
                index,
            });
        })?;

        debug!("Backrooms produced {} rooms", rooms.len());
        context.insert(Some(self.tag.as_str()), rooms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use warren_common::{FixedSequence, Point};

    fn run(width: usize, height: usize, rng: &mut dyn RandomSource) -> GenerationContext {
        let mut context = GenerationContext::new(width, height);
        BackroomsStep::new()
            .perform(&mut context, rng, &mut |_: &StepProgress<'_>| {})
            .expect("backrooms");
        context
    }

    #[test]
    fn test_layouts_share_edges() {
        let [spine, first, second, third] = large_rooms(12, 9, &mut FixedSequence::new(vec![0]));
        assert_eq!(spine, Rectangle::new(5, 0, 6, 9));
        assert_eq!(first.max_x(), spine.min_x());
        assert_eq!(first.max_y(), second.min_y());
        assert_eq!(third, Rectangle::new(0, 5, 6, 3));

        let [spine, ..] = large_rooms(12, 9, &mut FixedSequence::new(vec![3]));
        assert_eq!(spine, Rectangle::new(0, 3, 12, 4));
    }

    #[test]
    fn test_fixed_sequence_ten_by_ten() {
        // layout 0, minimum dimension 3, every later draw takes the smallest option
        let mut rng = FixedSequence::new(vec![0]);
        let context = run(10, 10, &mut rng);
        assert_eq!(rng.consumed(), 13);

        let rooms = context
            .get::<ItemList<Rectangle>>(Some(BackroomsStep::DEFAULT_TAG))
            .expect("room list");
        let expected = vec![
            Rectangle::new(4, 0, 3, 3),
            Rectangle::new(4, 2, 3, 3),
            Rectangle::new(4, 4, 3, 3),
            Rectangle::new(4, 6, 3, 4),
            Rectangle::new(6, 0, 3, 3),
            Rectangle::new(6, 2, 3, 3),
            Rectangle::new(6, 4, 3, 3),
            Rectangle::new(6, 6, 3, 4),
            Rectangle::new(0, 0, 3, 3),
            Rectangle::new(2, 0, 3, 3),
            Rectangle::new(0, 2, 3, 3),
            Rectangle::new(2, 2, 3, 3),
            Rectangle::new(0, 5, 3, 3),
            Rectangle::new(2, 5, 3, 3),
        ];
        assert_eq!(rooms.items().copied().collect::<Vec<_>>(), expected);
        assert!(rooms.iter().all(|entry| entry.tag == ROOM_ITEM_TAG));

        let map = context
            .get::<Grid<bool>>(Some(BackroomsStep::DEFAULT_TAG))
            .expect("grid");
        let floor: BTreeSet<Point> = map
            .positions()
            .filter(|p| map.get(*p) == Some(&true))
            .collect();
        let expected_floor: BTreeSet<Point> = [
            (5, 1),
            (5, 3),
            (5, 5),
            (5, 7),
            (5, 8),
            (7, 1),
            (7, 3),
            (7, 5),
            (7, 7),
            (7, 8),
            (1, 1),
            (3, 1),
            (1, 3),
            (3, 3),
            (1, 6),
            (3, 6),
        ]
        .into_iter()
        .map(Point::from)
        .collect();
        assert_eq!(floor, expected_floor);
    }

    #[test]
    fn test_later_rooms_win_overlaps() {
        let mut map = Grid::filled(7, 5, false);
        let rooms = [Rectangle::new(0, 0, 5, 5), Rectangle::new(2, 0, 5, 5)];
        let mut painted = Vec::new();
        paint_rooms(&mut map, &rooms, |i| painted.push(i)).expect("paint");

        assert_eq!(painted, vec![0, 1]);
        // the second perimeter walls off the first room's floor
        assert_eq!(map.get(Point::new(2, 2)), Some(&false));
        // the second interior opens the first room's east wall
        assert_eq!(map.get(Point::new(4, 2)), Some(&true));
        assert_eq!(map.get(Point::new(1, 2)), Some(&true));

        let mut reversed = Grid::filled(7, 5, false);
        paint_rooms(&mut reversed, rooms.iter().rev(), |_| {}).expect("paint");
        assert_ne!(map, reversed);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = run(40, 30, &mut fastrand::Rng::with_seed(11));
        let b = run(40, 30, &mut fastrand::Rng::with_seed(11));
        let tag = Some(BackroomsStep::DEFAULT_TAG);
        assert_eq!(
            a.get::<Grid<bool>>(tag).expect("grid"),
            b.get::<Grid<bool>>(tag).expect("grid")
        );
        assert_eq!(
            a.get::<ItemList<Rectangle>>(tag).expect("rooms"),
            b.get::<ItemList<Rectangle>>(tag).expect("rooms")
        );
    }

    #[test]
    fn test_rooms_stay_inside_map() {
        for seed in 0..20 {
            let context = run(31, 17, &mut fastrand::Rng::with_seed(seed));
            let bounds = context.bounds();
            let rooms = context
                .get::<ItemList<Rectangle>>(Some(BackroomsStep::DEFAULT_TAG))
                .expect("rooms");
            assert!(!rooms.is_empty());
            for room in rooms.items() {
                assert!(room.positions().all(|p| bounds.contains(p)), "{room:?}");
            }
        }
    }
}

//! End-to-end pipeline runs.

use warren_common::{Grid, Rectangle};
use warren_mapgen::item_list::ItemList;
use warren_mapgen::{
    BackroomsStep, CaveSmoothingStep, CompositeStep, GeneratorConfig, InvertStep, Pipeline,
    ProgressUnit, RandomFillStep, StepProgress,
};

fn composite(seed: u64, width: usize, height: usize) -> Grid<bool> {
    let config = GeneratorConfig {
        width,
        height,
        seed: Some(seed),
        ..GeneratorConfig::default()
    };
    let mut context = config.build_pipeline().run().expect("pipeline run");
    context
        .take::<Grid<bool>>(Some(CompositeStep::DEFAULT_TAG))
        .expect("composite grid")
}

#[test]
fn test_default_map_is_reproducible() {
    let first = composite(42, 80, 25);
    let second = composite(42, 80, 25);
    assert_eq!(first, second);
    assert_eq!(first.extent(), (80, 25));
}

#[test]
fn test_default_map_has_floor_and_walls() {
    let map = composite(7, 80, 25);
    let floor = map.count(|cell| *cell);
    assert!(floor > 0);
    assert!(floor < 80 * 25);
}

#[test]
fn test_different_seeds_differ() {
    assert_ne!(composite(1, 60, 30), composite(2, 60, 30));
}

#[test]
fn test_text_rendering_matches_extent() {
    let text = composite(3, 30, 12).to_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|line| line.chars().count() == 30));
    assert!(text.chars().all(|c| matches!(c, '.' | '#' | '\n')));
}

#[test]
fn test_cave_chain() {
    let context = Pipeline::new(50, 30)
        .with_seed(11)
        .add_step(RandomFillStep::new(CaveSmoothingStep::DEFAULT_TAG, 0.45).with_border(true))
        .add_step(CaveSmoothingStep::new().with_passes(4))
        .add_step(InvertStep::new(CaveSmoothingStep::DEFAULT_TAG, "cave"))
        .run()
        .expect("cave run");

    let walls = context
        .get::<Grid<bool>>(Some(CaveSmoothingStep::DEFAULT_TAG))
        .expect("walls");
    let floor = context.get::<Grid<bool>>(Some("cave")).expect("floor");
    for point in walls.positions() {
        assert_ne!(walls.cell(point).expect("wall"), floor.cell(point).expect("floor"));
    }
}

#[test]
fn test_backrooms_rooms_recorded() {
    let context = Pipeline::new(40, 20)
        .with_seed(5)
        .add_step(BackroomsStep::new())
        .run()
        .expect("backrooms run");

    let rooms = context
        .get::<ItemList<Rectangle>>(Some(BackroomsStep::DEFAULT_TAG))
        .expect("room list");
    assert!(!rooms.is_empty());
    let map = Rectangle::new(0, 0, 40, 20);
    assert!(rooms.items().all(|room| room.positions().any(|p| map.contains(p))));
}

#[test]
fn test_progress_reports_every_step() {
    let mut steps = Vec::new();
    let mut regions = 0;
    let mut observer = |progress: &StepProgress<'_>| match progress.unit {
        ProgressUnit::Step => steps.push(progress.step.to_owned()),
        ProgressUnit::Region => regions += 1,
        _ => {},
    };

    Pipeline::new(32, 16)
        .with_seed(8)
        .add_step(BackroomsStep::new())
        .add_step(CompositeStep::new())
        .run_with_observer(&mut observer)
        .expect("run");

    assert_eq!(steps, ["backrooms", "composite"]);
    assert!(regions > 0);
}

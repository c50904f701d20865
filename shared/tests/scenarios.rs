//! End-to-end runs of the session against the real physics world.

use shared::{
    BoxColor, BoxParams, EntityId, HeadlessScene, Material, Simulation, Vec2, WorldConfig,
    geometry::diagonals,
};

fn open_sky() -> Simulation<u64> {
    Simulation::new(WorldConfig {
        ground: None,
        ..WorldConfig::default()
    })
    .unwrap()
}

fn unit_box() -> BoxParams {
    BoxParams::new(Vec2::new(1.0, 1.0), BoxColor::Crimson, Material::default()).unwrap()
}

#[test]
fn lone_box_falls_under_gravity_and_never_splits() {
    let mut sim = open_sky();
    let mut scene = HeadlessScene::new();
    let id = sim.spawn_box(&mut scene, &unit_box(), Vec2::new(4.0, 0.0));

    // One second at 30 Hz.
    for _ in 0..30 {
        let report = sim.update(&mut scene);
        assert_eq!(report.contacts, 0);
        assert_eq!(report.split, 0);
    }

    let state = sim.body_state(id).expect("box still alive");
    assert!(
        (state.velocity.y - 9.8).abs() < 0.1,
        "vy = {}",
        state.velocity.y
    );
    assert!(
        state.position.y > 4.5 && state.position.y < 5.5,
        "y = {}",
        state.position.y
    );
    assert!((state.position.x - 4.0).abs() < 1.0e-4);
    assert_eq!(sim.box_count(), 1);

    // The visual followed the body.
    let visual = scene.find_owner(id).unwrap();
    let expected_px = state.position * sim.config().pixels_per_meter;
    assert!((visual.pose.position_px - expected_px).norm() < 1.0e-3);
}

#[test]
fn two_touching_boxes_become_eight_children() {
    let mut sim = open_sky();
    let mut scene = HeadlessScene::new();
    let a = sim.spawn_box(&mut scene, &unit_box(), Vec2::new(5.0, 5.0));
    let b = sim.spawn_box(&mut scene, &unit_box(), Vec2::new(5.9, 5.0));

    // The first step detects the overlap and records it.
    sim.update(&mut scene);
    assert_eq!(sim.pending_contacts(), 1);

    let pa = sim.body_state(a).unwrap().position;
    let pb = sim.body_state(b).unwrap().position;

    let report = sim.resolve_contacts(&mut scene);
    assert_eq!(report.split, 2);
    assert_eq!(report.spawned, 8);
    assert!(!sim.boxes().contains(a));
    assert!(!sim.boxes().contains(b));
    assert_eq!(sim.box_count(), 8);
    assert_eq!(sim.body_count(), 8);
    assert_eq!(scene.live(), 8);

    let mut expected: Vec<Vec2> = diagonals()
        .into_iter()
        .flat_map(|d| [pa + d, pb + d])
        .collect();
    for entity in sim.boxes().iter() {
        let state = sim.body_state(entity.id).unwrap();
        assert_eq!(state.size, Vec2::new(0.5, 0.5));
        let hit = expected
            .iter()
            .position(|p| (p - state.position).norm() < 1.0e-4)
            .expect("child at a parent diagonal");
        expected.swap_remove(hit);
    }
    assert!(expected.is_empty());
}

#[test]
fn launched_box_leaves_the_screen_and_is_released() {
    let mut sim = open_sky();
    let mut scene = HeadlessScene::new();
    let id = sim.launch(&mut scene, 100.0);

    let mut culled_at = None;
    for frame in 0..300 {
        let report = sim.update(&mut scene);
        if report.culled > 0 {
            culled_at = Some(frame);
            break;
        }
        let y = sim.body_state(id).unwrap().position.y;
        assert!(y <= sim.config().offscreen_limit_m() + 1.0);
    }

    assert!(culled_at.is_some(), "box never left the screen");
    assert!(!sim.boxes().contains(id));
    assert_eq!(sim.body_count(), 0);
    assert_eq!(scene.live(), 0);
    assert_eq!(scene.destroyed(), 1);
}

#[test]
fn launch_into_the_ledge_splits_with_consistent_accounting() {
    let mut sim: Simulation<u64> = Simulation::new(WorldConfig::default()).unwrap();
    let mut scene = HeadlessScene::new();
    let center_x = sim.config().viewport_px.x * 0.5;
    let first = sim.launch(&mut scene, center_x);
    for x in [100.0, 400.0, 900.0, 1200.0] {
        sim.launch(&mut scene, x);
    }

    let mut total_splits = 0;
    for _ in 0..240 {
        let before = sim.box_count();
        let report = sim.update(&mut scene);

        assert_eq!(report.live, before - report.destroyed() + report.spawned);
        assert_eq!(scene.live(), sim.box_count());
        // Every box has exactly one body; the ledge is the extra one.
        assert_eq!(sim.body_count(), sim.box_count() + 1);
        total_splits += report.split;
    }

    assert!(total_splits > 0, "nothing ever hit the ledge");
    assert!(!sim.boxes().contains(first));
    for entity in sim.boxes().iter() {
        assert!(entity.size.x >= 0.125 - 1.0e-6);
        assert!(entity.id != EntityId::GROUND);
    }
}

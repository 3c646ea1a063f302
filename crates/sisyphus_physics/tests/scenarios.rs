//! End-to-end tick scenarios for the physics world

use sisyphus_math::Vec3;
use sisyphus_physics::{
    penetration_overlap, Body, BodyKind, FixedTimestep, MoveControls, PhysicsConfig, PhysicsWorld,
};

const TOLERANCE: f32 = 0.0001;

fn unit_box(position: Vec3) -> Body {
    Body::new_box(position, Vec3::new(0.5, 0.5, 0.5))
}

/// Player walking +X into a box resting at the origin
fn approach_world(config: PhysicsConfig) -> PhysicsWorld {
    let mut world = PhysicsWorld::with_config(config);
    world.add_box(unit_box(Vec3::new(0.0, 0.5, 0.0)));
    // Facing +X: a quarter turn clockwise from -Z
    world.player_mut().yaw = -std::f32::consts::FRAC_PI_2;
    world.reset_player(Vec3::new(-2.0, 0.9, 0.0));
    world
}

#[test]
fn test_player_stops_at_box_face() {
    let config = PhysicsConfig {
        push_force: 0.0,
        ..PhysicsConfig::default()
    };
    let mut world = approach_world(config);
    let limit = -1.0 - world.config.collision_epsilon;

    for _ in 0..60 {
        world.tick(MoveControls::FORWARD);
        assert!(world.player().position.x <= limit + TOLERANCE);
    }

    assert!((world.player().position.x - limit).abs() < TOLERANCE);
    assert!(world.player().position.z.abs() < TOLERANCE);
}

#[test]
fn test_player_pushes_box_without_penetrating() {
    let mut world = approach_world(PhysicsConfig::default());
    let (key, _) = world.boxes().next().unwrap();

    let mut pushed = false;
    for _ in 0..60 {
        let report = world.tick(MoveControls::FORWARD);
        if let Some(resolution) = &report.resolution {
            pushed |= !resolution.pushes.is_empty();
        }

        let player = world.player().volume();
        let body = world.get_box(key).unwrap();
        assert!(penetration_overlap(&player, body) <= TOLERANCE);
    }

    assert!(pushed);
    let body = world.get_box(key).unwrap();
    assert!(body.position.x > 0.0);
    // Pushed through its center: no spin
    assert!(body.yaw.abs() < TOLERANCE);
}

#[test]
fn test_box_settles_on_ground() {
    let mut world = PhysicsWorld::new();
    let key = world.add_box(unit_box(Vec3::new(0.0, 3.0, 0.0)));

    for _ in 0..300 {
        world.tick(MoveControls::empty());
        assert!(world.get_box(key).unwrap().position.y >= 0.5);
    }

    // Resting boxes keep a small upward velocity: each tick gravity drives the
    // box into the ground, the contact bounces it, then the decay scales it.
    // The steady state is v = e * d * (-g - v), i.e. v = e*d*(-g) / (1 + e*d).
    let config = world.config.clone();
    let bounce = config.elasticity * config.velocity_decay;
    let resting_vy = bounce * -config.gravity / (1.0 + bounce);

    let body = world.get_box(key).unwrap();
    assert!((body.position.y - 0.5).abs() < 1e-6);
    assert!((body.velocity.y - resting_vy).abs() < 1e-6);
    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.velocity.z, 0.0);

    // Steady state: height pinned at the ground offset, speed unchanged
    let speed = body.speed();
    for _ in 0..100 {
        world.tick(MoveControls::empty());
        let body = world.get_box(key).unwrap();
        assert_eq!(body.position.y, 0.5);
        assert!((body.speed() - speed).abs() < 1e-6);
    }
}

#[test]
fn test_boulder_resets_after_crossing() {
    let mut world = PhysicsWorld::new().with_boulder();
    let spawn = world.boulder().unwrap().spawn();
    assert_eq!(spawn, Vec3::new(0.0, 1.5, -20.0));

    // Let it sit on the ground first
    for _ in 0..10 {
        world.tick(MoveControls::empty());
    }
    assert_eq!(world.boulder().unwrap().body().position.y, 1.5);

    world.boulder_mut().unwrap().push(Vec3::new(0.0, 0.0, 50.0));

    let mut reset_tick = None;
    for tick in 0..30 {
        let report = world.tick(MoveControls::empty());
        if report.boulder_reset {
            reset_tick = Some(tick);
            break;
        }
        assert!(world.boulder().unwrap().body().position.z <= 0.0);
    }

    assert!(reset_tick.is_some());
    let boulder = world.boulder().unwrap();
    assert_eq!(boulder.body().position, spawn);
    assert_eq!(boulder.body().velocity, Vec3::ZERO);
    assert_eq!(boulder.body().yaw_angular_velocity, 0.0);
    assert_eq!(boulder.resets(), 1);
}

#[test]
fn test_boulder_past_line_resets_on_next_tick() {
    let mut world = PhysicsWorld::new().with_boulder();
    world.boulder_mut().unwrap().body_mut().position = Vec3::new(0.0, 1.5, 0.5);

    let report = world.tick(MoveControls::empty());

    assert!(report.boulder_reset);
    let boulder = world.boulder().unwrap();
    assert_eq!(boulder.body().position, boulder.spawn());
}

#[test]
fn test_wedged_player_hits_iteration_cap() {
    let mut world = PhysicsWorld::new();
    let left = world.add_box(unit_box(Vec3::new(-0.9, 0.5, 0.0)));
    let right = world.add_box(unit_box(Vec3::new(0.9, 0.5, 0.0)));
    world.reset_player(Vec3::new(0.0, 0.9, 0.0));

    let report = world.tick(MoveControls::FORWARD);
    let resolution = report.resolution.as_ref().unwrap();

    assert_eq!(resolution.iterations, world.config.max_collision_iterations);
    assert!(!resolution.converged);
    assert!(report.hit_iteration_cap());

    // Residual overlap stays bounded
    let player = world.player().volume();
    let bound = 0.2 + 2.0 * world.config.collision_epsilon + TOLERANCE;
    for key in [left, right] {
        assert!(penetration_overlap(&player, world.get_box(key).unwrap()) <= bound);
    }

    // Moving along -Z, perpendicular to both contact normals: no pushes
    assert!(resolution.pushes.is_empty());
}

#[test]
fn test_snapshots_follow_simulation() {
    let mut world = PhysicsWorld::new().with_boulder();
    let key = world.add_box(unit_box(Vec3::new(3.0, 2.0, -4.0)));

    world.tick(MoveControls::empty());

    let snapshots = world.snapshots();
    let box_snapshot = snapshots.iter().find(|s| s.kind == BodyKind::Box).unwrap();
    assert_eq!(box_snapshot.position, world.get_box(key).unwrap().position);
}

#[test]
fn test_fixed_timestep_decouples_frame_rate() {
    let mut timestep = FixedTimestep::default();
    let mut world = PhysicsWorld::new();

    // One second of 30 Hz frames
    for _ in 0..30 {
        for _ in 0..timestep.advance(1.0 / 30.0) {
            world.tick(MoveControls::empty());
        }
    }

    assert!((59..=60).contains(&world.ticks()));
}
